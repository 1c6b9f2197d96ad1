use super::*;
use pretty_assertions::assert_eq;
use quiver_ir::ProgramBuilder;

fn succ(b: &ProgramBuilder, n: usize) -> Value {
    let mut value = b.value("O", vec![]);
    for _ in 0..n {
        value = b.value("S", vec![value]);
    }
    value
}

#[test]
fn test_constructor_and_binding() {
    let b = ProgramBuilder::new();
    let params = vec![b.bind("a"), b.ctor("S", vec![b.bind("p")])];
    let args = vec![succ(&b, 2), succ(&b, 3)];
    let mut env = Environment::new();
    let mut arrows = Vec::new();

    assert!(match_clause(&params, &args, &mut env, &mut arrows));
    assert_eq!(env.lookup(b.name("a")), Some(&succ(&b, 2)));
    assert_eq!(env.lookup(b.name("p")), Some(&succ(&b, 2)));
    assert!(arrows.is_empty());
}

#[test]
fn test_wrong_constructor_fails() {
    let b = ProgramBuilder::new();
    let params = vec![b.ctor("O", vec![])];
    let mut env = Environment::new();
    let mut arrows = Vec::new();
    assert!(!match_clause(&params, &[succ(&b, 1)], &mut env, &mut arrows));
    assert!(!match_clause(&params, &[Value::int(0)], &mut env, &mut arrows));
}

#[test]
fn test_arrow_sites_in_order() {
    let b = ProgramBuilder::new();
    let params = vec![
        b.ctor("S", vec![Pattern::arrow(b.bind("x"))]),
        b.alias(
            "whole",
            b.ctor(
                "Pair",
                vec![Pattern::arrow(b.bind("y")), Pattern::arrow(b.bind("z"))],
            ),
        ),
    ];
    let pair = b.value("Pair", vec![succ(&b, 1), succ(&b, 2)]);
    let args = vec![succ(&b, 3), pair.clone()];
    let mut env = Environment::new();
    let mut arrows = Vec::new();

    assert!(match_clause(&params, &args, &mut env, &mut arrows));
    let sites: Vec<(usize, Value)> = arrows
        .iter()
        .map(|site| (site.slot, site.term.clone()))
        .collect();
    assert_eq!(
        sites,
        vec![(0, succ(&b, 2)), (1, succ(&b, 1)), (1, succ(&b, 2))]
    );
    assert_eq!(arrows[2].inner, &b.bind("z"));
    // Arrow names are bound later, from the recursive results.
    assert_eq!(env.lookup(b.name("x")), None);
    assert_eq!(env.lookup(b.name("whole")), Some(&pair));
}

#[test]
fn test_result_matching() {
    let b = ProgramBuilder::new();
    let mut env = Environment::new();
    assert!(match_result(&b.ctor("S", vec![b.bind("m")]), &succ(&b, 1), &mut env));
    assert_eq!(env.lookup(b.name("m")), Some(&succ(&b, 0)));
    assert!(!match_result(&b.ctor("O", vec![]), &succ(&b, 1), &mut env));
    assert!(!match_result(&Pattern::arrow(Pattern::Wildcard), &succ(&b, 1), &mut env));
}
