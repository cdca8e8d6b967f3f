#![cfg(not(miri))]

use std::{fs::read_to_string, path::PathBuf};

use dir_test::{dir_test, Fixture};
use scasp_nlg::{
    nlg::{nlg_models, nlg_single_model},
    parse_models,
    parser::{ast::ResponseAST, ParseMode},
    render::{EnglishRenderer, Lexicon, Renderer, ENGLISH},
    SolverOutput,
};

fn resource(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("resources")
        .join(name)
}

#[dir_test(
    dir: "$CARGO_MANIFEST_DIR/tests/resources/responses",
    glob: "*.txt",
)]
fn parse_response(fixture: Fixture<&str>) {
    _ = env_logger::builder().is_test(true).try_init();

    let output = SolverOutput::new(fixture.path().to_owned(), fixture.content()).unwrap();
    let response = output.parse(ParseMode::Strict).unwrap();

    assert_eq!(response.query().statements().count(), 1);
    assert!(response.is_unsatisfiable() || !response.answers().is_empty());
    assert_eq!(response.span().fragment().trim(), output.text().trim());
}

#[test]
fn explain_rock_paper_scissors() {
    _ = env_logger::builder().is_test(true).try_init();

    let raw = read_to_string(resource("responses/rps.txt")).unwrap();
    let models = parse_models("rps.txt", &raw).unwrap();
    assert_eq!(models.len(), 3);
    assert!(models.iter().all(|model| model.len() == 9));

    let renderer = EnglishRenderer::new(Lexicon::load(&resource("rps_lexicon.json")).unwrap());
    let explanation = nlg_models(&models).unwrap();
    let expected = read_to_string(resource("rps_explanation.txt")).unwrap();

    assert_eq!(explanation.render(&renderer, ENGLISH).unwrap(), expected.trim_end());
}

#[test]
fn explain_single_model() {
    let raw = read_to_string(resource("responses/rps.txt")).unwrap();
    let models = parse_models("rps.txt", &raw).unwrap();

    let renderer = EnglishRenderer::new(Lexicon::load(&resource("rps_lexicon.json")).unwrap());
    let tree = nlg_single_model(&models[2]).unwrap();

    // A subject pair lists its predicates in key order, `participant_in(_,rps)` before `player`.
    assert_eq!(
        renderer.render(&tree, ENGLISH).unwrap(),
        "A wins RPS if
* A and C are participants in RPS and players,
* A throws paper,
* C throws rock,
* paper beats rock and
* RPS is a game"
    );
}

#[test]
fn unsatisfiable_query_has_no_models() {
    let raw = read_to_string(resource("responses/no_models.txt")).unwrap();
    assert!(parse_models("no_models.txt", &raw).unwrap().is_empty());
}

#[test]
fn disunity_bindings() {
    let raw = read_to_string(resource("responses/disunity.txt")).unwrap();
    let output = SolverOutput::new("disunity.txt".to_owned(), &raw).unwrap();
    let response = output.parse(ParseMode::Strict).unwrap();

    let answer = &response.answers()[0];
    let bindings = answer
        .bindings()
        .bindings()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    assert_eq!(bindings, vec!["P \\= 1", "P \\= 2", "Game = G"]);
    assert_eq!(answer.justification().map(|tree| tree.reasons().depth()), Some(4));

    // `not player(2)` cannot be expressed as a fact
    assert!(parse_models("disunity.txt", &raw).is_err());
}
