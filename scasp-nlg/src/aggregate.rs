//! This module defines the aggregation of [Fact]s that share a predicate or a subject.
//!
//! All aggregations are built from [aggregate_by],
//! which groups items by the canonical text of a key
//! and merges every group with more than one member.

use std::fmt::Display;

use thiserror::Error;

use crate::{
    fact::{Argument, Fact},
    nlg::{NlgTree, Typography},
};

/// Errors that occur while aggregating facts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregationError {
    /// A group without members was encountered
    #[error("encountered an empty group")]
    EmptyGroup,
    /// Facts with the same predicate disagree on their object
    #[error("facts with predicate `{functor}` have different objects: {objects:?}")]
    ObjectMismatch {
        /// Shared functor
        functor: String,
        /// Objects of the grouped facts
        objects: Vec<String>,
    },
    /// The proposition does not have a single predicate
    #[error("`{proposition}` has no single predicate")]
    NoPredicate {
        /// Canonical text of the proposition
        proposition: String,
    },
    /// Only pairs of predicates can be combined under one subject
    #[error("cannot combine {size} predicates of subject `{subject}`, only pairs are supported")]
    UnsupportedGroupSize {
        /// Canonical text of the shared subject
        subject: String,
        /// Number of propositions with this subject
        size: usize,
    },
}

/// Subject of a proposition
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subject {
    /// A single argument
    Single(Argument),
    /// Several arguments sharing the same predicate
    List(Vec<Argument>),
}

impl Subject {
    /// Return the arguments making up this subject.
    pub fn arguments(&self) -> &[Argument] {
        match self {
            Subject::Single(argument) => std::slice::from_ref(argument),
            Subject::List(arguments) => arguments,
        }
    }

    /// Return whether this subject refers to more than one argument.
    pub fn is_plural(&self) -> bool {
        self.arguments().len() > 1
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subject::Single(argument) => write!(f, "{argument}"),
            Subject::List(arguments) => {
                f.write_str("[")?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{argument}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// A fact with its subject left out
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// Predicate of a unary fact
    Intransitive {
        /// Name of the predicate
        functor: String,
    },
    /// Predicate of a binary fact, together with its object
    Transitive {
        /// Name of the predicate
        functor: String,
        /// Object of the fact
        object: Argument,
    },
}

impl Predicate {
    /// Return the name of the predicate.
    pub fn functor(&self) -> &str {
        match self {
            Predicate::Intransitive { functor } | Predicate::Transitive { functor, .. } => functor,
        }
    }

    /// Return the object of a transitive predicate.
    pub fn object(&self) -> Option<&Argument> {
        match self {
            Predicate::Intransitive { .. } => None,
            Predicate::Transitive { object, .. } => Some(object),
        }
    }

    fn of(functor: &str, object: Option<&Argument>) -> Self {
        match object {
            Some(object) => Predicate::Transitive {
                functor: functor.to_owned(),
                object: object.clone(),
            },
            None => Predicate::Intransitive {
                functor: functor.to_owned(),
            },
        }
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::Intransitive { functor } => f.write_str(functor),
            Predicate::Transitive { functor, object } => write!(f, "{functor}(_,{object})"),
        }
    }
}

/// Several facts merged into one statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AggregateFact {
    /// Facts with the same predicate, e.g. `player(a)` and `player(c)`
    ByPredicate {
        /// Name of the shared predicate
        functor: String,
        /// Subjects of the merged facts, in group order
        subjects: Vec<Argument>,
        /// Shared object, if the predicate is binary
        object: Option<Argument>,
    },
    /// Two predicates holding for the same subject
    BySubject {
        /// Shared subject
        subject: Subject,
        /// Predicate encountered first
        first: Predicate,
        /// Predicate encountered second
        second: Predicate,
    },
}

impl Display for AggregateFact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregateFact::ByPredicate {
                functor,
                subjects,
                object,
            } => {
                let subject = Subject::List(subjects.clone());
                match object {
                    Some(object) => write!(f, "{functor}({subject},{object})"),
                    None => write!(f, "{functor}({subject})"),
                }
            }
            AggregateFact::BySubject {
                subject,
                first,
                second,
            } => write!(f, "{subject}:{{{first},{second}}}"),
        }
    }
}

/// Unit handled by the aggregation functions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Proposition {
    /// A single fact
    Fact(Fact),
    /// A merged statement
    Aggregate(AggregateFact),
}

impl Proposition {
    /// Return the subject of this proposition.
    pub fn subject(&self) -> Subject {
        match self {
            Proposition::Fact(fact) => Subject::Single(fact.subject().clone()),
            Proposition::Aggregate(AggregateFact::ByPredicate { subjects, .. }) => {
                Subject::List(subjects.clone())
            }
            Proposition::Aggregate(AggregateFact::BySubject { subject, .. }) => subject.clone(),
        }
    }

    /// Return the predicate of this proposition.
    ///
    /// Returns an error for propositions combining two predicates.
    pub fn predicate(&self) -> Result<Predicate, AggregationError> {
        match self {
            Proposition::Fact(fact) => Ok(Predicate::of(fact.functor(), fact.object())),
            Proposition::Aggregate(AggregateFact::ByPredicate {
                functor, object, ..
            }) => Ok(Predicate::of(functor, object.as_ref())),
            Proposition::Aggregate(AggregateFact::BySubject { .. }) => {
                Err(AggregationError::NoPredicate {
                    proposition: self.to_string(),
                })
            }
        }
    }
}

impl From<Fact> for Proposition {
    fn from(value: Fact) -> Self {
        Self::Fact(value)
    }
}

impl Display for Proposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Proposition::Fact(fact) => write!(f, "{fact}"),
            Proposition::Aggregate(aggregate) => write!(f, "{aggregate}"),
        }
    }
}

/// Sort keyed items by key, keeping the encounter order among equal keys,
/// and split them into maximal runs of equal keys.
fn runs<Item>(mut keyed: Vec<(String, Item)>) -> Vec<(String, Vec<Item>)> {
    keyed.sort_by(|(left, _), (right, _)| left.cmp(right));

    let mut result: Vec<(String, Vec<Item>)> = Vec::new();
    for (key, item) in keyed {
        match result.last_mut() {
            Some((last, group)) if *last == key => group.push(item),
            _ => result.push((key, vec![item])),
        }
    }

    result
}

/// Group items by the canonical text of a key.
///
/// Groups are returned in the order of their keys;
/// within a group, items keep their original order.
pub fn group_by<Item, Key, Show>(items: Vec<Item>, mut key: Key) -> Vec<Vec<Item>>
where
    Key: FnMut(&Item) -> Show,
    Show: Display,
{
    let keyed = items
        .into_iter()
        .map(|item| (key(&item).to_string(), item))
        .collect();

    runs(keyed).into_iter().map(|(_, group)| group).collect()
}

/// Group items by the canonical text of a key
/// and replace every group with more than one member by the result of `merge`.
///
/// The result is ordered by key.
pub fn aggregate_by<Item, Key, Show, Merge>(
    items: Vec<Item>,
    mut key: Key,
    mut merge: Merge,
) -> Result<Vec<Item>, AggregationError>
where
    Key: FnMut(&Item) -> Result<Show, AggregationError>,
    Show: Display,
    Merge: FnMut(Vec<Item>) -> Result<Item, AggregationError>,
{
    let keyed = items
        .into_iter()
        .map(|item| Ok((key(&item)?.to_string(), item)))
        .collect::<Result<Vec<_>, AggregationError>>()?;

    let mut result = Vec::new();
    for (key, mut group) in runs(keyed) {
        log::trace!("group `{}` with {} members", key, group.len());

        match group.len() {
            0 => return Err(AggregationError::EmptyGroup),
            1 => result.extend(group.pop()),
            _ => result.push(merge(group)?),
        }
    }

    Ok(result)
}

fn merge_by_predicate(group: Vec<Proposition>) -> Result<Proposition, AggregationError> {
    let predicate = group
        .first()
        .ok_or(AggregationError::EmptyGroup)?
        .predicate()?;

    let mut subjects = Vec::new();
    let mut objects = Vec::new();
    for proposition in &group {
        subjects.extend(proposition.subject().arguments().iter().cloned());
        objects.push(proposition.predicate()?.object().cloned());
    }

    if objects.iter().any(|object| object.as_ref() != predicate.object()) {
        return Err(AggregationError::ObjectMismatch {
            functor: predicate.functor().to_owned(),
            objects: objects
                .iter()
                .map(|object| {
                    object
                        .as_ref()
                        .map_or_else(String::new, ToString::to_string)
                })
                .collect(),
        });
    }

    Ok(Proposition::Aggregate(AggregateFact::ByPredicate {
        functor: predicate.functor().to_owned(),
        subjects,
        object: predicate.object().cloned(),
    }))
}

fn merge_by_subject(group: Vec<Proposition>) -> Result<Proposition, AggregationError> {
    let subject = group
        .first()
        .ok_or(AggregationError::EmptyGroup)?
        .subject();

    match group.as_slice() {
        [first, second] => Ok(Proposition::Aggregate(AggregateFact::BySubject {
            subject,
            first: first.predicate()?,
            second: second.predicate()?,
        })),
        _ => Err(AggregationError::UnsupportedGroupSize {
            subject: subject.to_string(),
            size: group.len(),
        }),
    }
}

/// Merge propositions with the same predicate into one statement about a list of subjects.
///
/// For binary facts, the object is part of the predicate,
/// so `participant_in(a,rps)` and `participant_in(c,rps)` are merged
/// while `throws(a,rock)` and `throws(c,paper)` are not.
pub fn aggregate_by_predicate(
    propositions: Vec<Proposition>,
) -> Result<Vec<Proposition>, AggregationError> {
    aggregate_by(propositions, Proposition::predicate, merge_by_predicate)
}

/// Merge pairs of propositions with the same subject into one statement.
pub fn aggregate_by_subject(
    propositions: Vec<Proposition>,
) -> Result<Vec<Proposition>, AggregationError> {
    aggregate_by(
        propositions,
        |proposition| Ok(proposition.subject()),
        merge_by_subject,
    )
}

/// Aggregate the given facts by predicate, then by subject,
/// and combine the result into a conjunction.
pub fn aggregate_all(facts: Vec<Fact>, typography: Typography) -> Result<NlgTree, AggregationError> {
    let propositions = facts.into_iter().map(Proposition::from).collect();
    let aggregated = aggregate_by_subject(aggregate_by_predicate(propositions)?)?;

    Ok(NlgTree::Conjunction(
        typography,
        aggregated.into_iter().map(NlgTree::Proposition).collect(),
    ))
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use quickcheck_macros::quickcheck;
    use test_log::test;

    use crate::{
        fact::{Argument, Fact},
        nlg::{NlgTree, Typography},
    };

    use super::{
        aggregate_all, aggregate_by, aggregate_by_predicate, aggregate_by_subject, group_by,
        AggregateFact, AggregationError, Predicate, Proposition, Subject,
    };

    fn atom(name: &str) -> Argument {
        Argument::Atom(name.to_owned())
    }

    fn unary(functor: &str, subject: &str) -> Proposition {
        Fact::unary(functor, atom(subject)).into()
    }

    fn binary(functor: &str, subject: &str, object: &str) -> Proposition {
        Fact::binary(functor, atom(subject), atom(object)).into()
    }

    #[test]
    fn group_by_is_stable() {
        let groups = group_by(vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')], |item| item.0);
        assert_eq!(groups, vec![vec![(1, 'b'), (1, 'd')], vec![(2, 'a'), (2, 'c')]]);
    }

    #[test]
    fn group_by_compares_canonical_text() {
        let groups = group_by(vec![10, 9, 1], |item| *item);
        assert_eq!(groups, vec![vec![1], vec![10], vec![9]]);
    }

    #[quickcheck]
    fn singletons_are_sorted(items: HashSet<u16>) -> bool {
        let items = items.into_iter().collect::<Vec<_>>();
        log::debug!("used items: {:?}", items);

        let mut expected = items.clone();
        expected.sort_by_key(|item| item.to_string());

        let result = aggregate_by(items, |item| Ok(*item), |_| Err(AggregationError::EmptyGroup));
        result == Ok(expected)
    }

    #[test]
    fn merge_groups() {
        let result = aggregate_by(
            vec![3, 1, 3, 2, 3],
            |item| Ok(*item),
            |group| Ok(group.iter().sum()),
        )
        .unwrap();
        assert_eq!(result, vec![1, 2, 9]);
    }

    #[test]
    fn by_predicate() {
        let result = aggregate_by_predicate(vec![
            binary("participant_in", "a", "rps"),
            unary("player", "a"),
            unary("game", "rps"),
            binary("participant_in", "c", "rps"),
            unary("player", "c"),
        ])
        .unwrap();

        let shown = result.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(
            shown,
            vec!["game(rps)", "participant_in([a,c],rps)", "player([a,c])"]
        );
    }

    #[test]
    fn by_predicate_keeps_objects_apart() {
        let result = aggregate_by_predicate(vec![
            binary("throws", "a", "rock"),
            binary("throws", "c", "paper"),
        ])
        .unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn by_predicate_rejects_paired_predicates() {
        let paired = Proposition::Aggregate(AggregateFact::BySubject {
            subject: Subject::Single(atom("a")),
            first: Predicate::Intransitive {
                functor: "player".to_owned(),
            },
            second: Predicate::Intransitive {
                functor: "winner".to_owned(),
            },
        });

        assert!(matches!(
            aggregate_by_predicate(vec![paired]),
            Err(AggregationError::NoPredicate { .. })
        ));
    }

    #[test]
    fn by_subject_pairs_in_encounter_order() {
        let result = aggregate_by_subject(vec![
            unary("player", "a"),
            unary("game", "rps"),
            binary("participant_in", "a", "rps"),
        ])
        .unwrap();

        assert_eq!(
            result[0],
            Proposition::Aggregate(AggregateFact::BySubject {
                subject: Subject::Single(atom("a")),
                first: Predicate::Intransitive {
                    functor: "player".to_owned()
                },
                second: Predicate::Transitive {
                    functor: "participant_in".to_owned(),
                    object: atom("rps"),
                },
            })
        );
        assert_eq!(result[1], unary("game", "rps"));
    }

    #[test]
    fn by_subject_requires_pairs() {
        let result = aggregate_by_subject(vec![
            unary("player", "a"),
            unary("winner", "a"),
            binary("throws", "a", "rock"),
        ]);

        assert_eq!(
            result,
            Err(AggregationError::UnsupportedGroupSize {
                subject: "a".to_owned(),
                size: 3
            })
        );
    }

    #[test]
    fn aggregate_shared_evidence() {
        let facts = vec![
            Fact::unary("game", atom("rps")),
            Fact::binary("participant_in", atom("a"), atom("rps")),
            Fact::unary("player", atom("a")),
            Fact::unary("player", atom("c")),
            Fact::binary("participant_in", atom("c"), atom("rps")),
        ];

        let NlgTree::Conjunction(typography, items) =
            aggregate_all(facts, Typography::Bulleted).unwrap()
        else {
            panic!("expected a conjunction");
        };

        assert_eq!(typography, Typography::Bulleted);
        let shown = items.iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(
            shown,
            vec!["[a,c]:{participant_in(_,rps),player}", "game(rps)"]
        );
    }
}
