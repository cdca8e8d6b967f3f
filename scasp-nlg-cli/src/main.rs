/*!
  Binary for the CLI of scasp-nlg: snlg
*/

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences
)]

pub mod cli;
pub mod error;

use std::fs::read_to_string;

use clap::Parser;
use cli::CliApp;
use colored::Colorize;
use error::CliError;
use scasp_nlg::{
    error::Error,
    fact::{extract_models, Fact},
    nlg::{nlg_models, nlg_single_model},
    parser::ast::ast_to_ascii_tree_string,
    render::{EnglishRenderer, Lexicon, Renderer},
    SolverOutput,
};

fn print_models(models: &[Vec<Fact>]) {
    for (index, model) in models.iter().enumerate() {
        let facts = model
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        println!("{} {{ {facts} }}", format!("MODEL {}:", index + 1).bold());
    }
}

fn run(cli: CliApp) -> Result<(), CliError> {
    let filename = cli.response.to_string_lossy().to_string();
    let raw = read_to_string(&cli.response).map_err(|error| CliError::Reading {
        filename: filename.clone(),
        error,
    })?;

    let output = SolverOutput::new(filename.clone(), &raw).map_err(Error::from)?;
    let response = match output.parse(cli.parsing.mode()) {
        Ok(response) => response,
        Err(report) => {
            report.eprint(report.build_reports())?;
            return Err(CliError::ResponseParsing { filename });
        }
    };

    if cli.parsing.print_tree {
        if let Some(tree) = ast_to_ascii_tree_string(&response) {
            println!("{tree}");
        }
    }

    if response.is_unsatisfiable() {
        println!("{}", "no models".yellow().bold());
    }
    if !cli.parsing.print_models && cli.render.lexicon.is_none() {
        log::info!("{filename}: response parsed");
        return Ok(());
    }

    let models = extract_models(&response).map_err(Error::from)?;
    if cli.parsing.print_models {
        print_models(&models);
    }

    let Some(lexicon) = &cli.render.lexicon else {
        return Ok(());
    };
    if models.is_empty() {
        log::warn!("{filename}: there are no models to explain");
        return Ok(());
    }

    let renderer = EnglishRenderer::new(Lexicon::load(lexicon).map_err(Error::from)?);
    let language = &cli.render.language;

    if cli.render.single {
        for model in &models {
            let tree = nlg_single_model(model).map_err(Error::from)?;
            println!("{}\n", renderer.render(&tree, language).map_err(Error::from)?);
        }
    } else {
        let explanation = nlg_models(&models).map_err(Error::from)?;
        println!(
            "{}",
            explanation.render(&renderer, language).map_err(Error::from)?
        );
    }

    Ok(())
}

fn main() {
    let cli = CliApp::parse();

    cli.logging.initialize_logging();
    log::info!("Version: {}", clap::crate_version!());
    log::debug!("Response file: {:?}", cli.response);

    run(cli).unwrap_or_else(|err| {
        log::error!("{} {err}", "error:".red().bold());
        std::process::exit(1)
    })
}
