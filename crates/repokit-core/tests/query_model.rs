//! Query model tests: hand-written path structs, dynamic builders, predicates.

use pretty_assertions::assert_eq;
use rstest::rstest;
use repokit_core::{
    ColumnRef, CompareOp, Direction, Entity, EntityPath, Path, PathBuilderFactory, Predicate,
    Projection, RootPath, Value,
};

struct Finding;

impl Entity for Finding {
    const NAME: &'static str = "Finding";
    const TABLE: &'static str = "findings";
}

/// Hand-written path struct, the way application repositories declare them.
struct QFinding {
    root: EntityPath<Finding>,
    id: Path<String>,
    content: Path<String>,
    confidence: Path<Option<String>>,
    score: Path<i64>,
}

impl QFinding {
    fn new(alias: &str) -> Self {
        let root = EntityPath::<Finding>::with_alias(alias);
        Self {
            id: root.column("id"),
            content: root.column("content"),
            confidence: root.column("confidence"),
            score: root.column("score"),
            root,
        }
    }
}

fn col(alias: &str, column: &str) -> ColumnRef {
    ColumnRef {
        alias: alias.into(),
        column: column.into(),
    }
}

#[rstest]
#[case(CompareOp::Eq, "=")]
#[case(CompareOp::Ne, "<>")]
#[case(CompareOp::Lt, "<")]
#[case(CompareOp::Le, "<=")]
#[case(CompareOp::Gt, ">")]
#[case(CompareOp::Ge, ">=")]
fn compare_ops_spell_sql(#[case] op: CompareOp, #[case] sql: &str) {
    assert_eq!(op.as_sql(), sql);
}

#[test]
fn typed_comparisons_carry_values() {
    let f = QFinding::new("f");
    assert_eq!(
        f.score.ge(5),
        Predicate::Compare {
            column: col("f", "score"),
            op: CompareOp::Ge,
            value: Value::Integer(5),
        }
    );
    assert_eq!(
        f.content.like("%tokio%"),
        Predicate::Like {
            column: col("f", "content"),
            pattern: "%tokio%".into(),
        }
    );
    assert_eq!(
        f.confidence.eq(Some("high".to_string())),
        Predicate::Compare {
            column: col("f", "confidence"),
            op: CompareOp::Eq,
            value: Value::Text("high".into()),
        }
    );
}

#[test]
fn in_list_collects_values() {
    let f = QFinding::new("f");
    assert_eq!(
        f.id.in_list(["fnd-1", "fnd-2"]),
        Predicate::In {
            column: col("f", "id"),
            values: vec![Value::Text("fnd-1".into()), Value::Text("fnd-2".into())],
        }
    );
}

#[test]
fn self_join_uses_distinct_aliases() {
    let a = QFinding::new("a");
    let b = QFinding::new("b");
    assert_eq!(
        a.id.eq_path(&b.id),
        Predicate::ColumnCompare {
            left: col("a", "id"),
            op: CompareOp::Eq,
            right: col("b", "id"),
        }
    );
    assert_ne!(RootPath::from(&a.root), RootPath::from(&b.root));
}

#[test]
fn ordering_and_projection() {
    let f = QFinding::new("f");
    assert_eq!(f.score.desc().direction, Direction::Desc);
    assert_eq!(f.score.asc().column, col("f", "score"));
    assert_eq!(Projection::from(&f.content), Projection::Column(col("f", "content")));
    assert_eq!(f.root.all(), Projection::All { alias: "f".into() });
}

#[test]
fn factory_builder_matches_hand_written_paths() {
    let builder = PathBuilderFactory::new().create::<Finding>();
    let hand = QFinding::new("finding");
    assert_eq!(builder.root(), &hand.root);
    assert_eq!(builder.string("content").column_ref(), hand.content.column_ref());
}
