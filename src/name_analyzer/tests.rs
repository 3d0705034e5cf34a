//! Unit tests for name resolution.

use crate::ast::{
    ast::{
        FunctionDeclaration, Identifier, MainDeclaration, PatternDeclaration, Program,
        VarDeclaration,
    },
    expressions::{AssignOperator, BinaryOperator, Expr},
    statements::{Range, Stmt},
};
use crate::errors::{diagnostics::Diagnostics, errors::ErrorImpl};
use crate::Position;

use super::name_analyzer::NameAnalyzer;

fn at(line: u32) -> Position {
    Position::at(line)
}

fn ident(name: &str, line: u32) -> Identifier {
    Identifier::new(name, at(line))
}

fn arg(name: &str) -> VarDeclaration {
    VarDeclaration::new(ident(name, 1))
}

fn arg_with_default(name: &str, value: i64) -> VarDeclaration {
    VarDeclaration::with_default(ident(name, 1), Expr::int(value, at(1)))
}

fn function(name: &str, args: Vec<VarDeclaration>, body: Vec<Stmt>) -> FunctionDeclaration {
    FunctionDeclaration::new(ident(name, 1), args, body)
}

fn main_with(body: Vec<Stmt>) -> MainDeclaration {
    MainDeclaration::new(body, at(50))
}

fn run(program: &mut Program) -> Vec<ErrorImpl> {
    let mut diagnostics = Diagnostics::new(true);
    NameAnalyzer::new(&mut diagnostics).analyze(program);
    diagnostics
        .into_errors()
        .into_iter()
        .map(|error| error.get_kind().clone())
        .collect()
}

fn run_main(body: Vec<Stmt>) -> Vec<ErrorImpl> {
    run(&mut Program::new(vec![], vec![], main_with(body)))
}

#[test]
fn test_clean_program() {
    let mut program = Program::new(
        vec![function(
            "add",
            vec![arg("a"), arg("b")],
            vec![Stmt::ret(
                Some(Expr::binary(
                    Expr::identifier("a", at(2)),
                    BinaryOperator::Plus,
                    Expr::identifier("b", at(2)),
                )),
                at(2),
            )],
        )],
        vec![],
        main_with(vec![Stmt::put(Expr::call(
            "add",
            vec![Expr::int(1, at(51)), Expr::int(2, at(51))],
            at(51),
        ))]),
    );

    assert!(run(&mut program).is_empty());
}

#[test]
fn test_duplicate_function_is_renamed() {
    let mut program = Program::new(
        vec![
            FunctionDeclaration::new(ident("f", 1), vec![], vec![]),
            FunctionDeclaration::new(ident("f", 4), vec![arg("x")], vec![]),
            FunctionDeclaration::new(ident("f", 7), vec![], vec![]),
        ],
        vec![],
        main_with(vec![]),
    );

    let errors = run(&mut program);

    assert_eq!(
        errors,
        vec![
            ErrorImpl::RedefinitionOfFunction {
                function: "f".to_string()
            };
            2
        ]
    );
    let names: Vec<&str> = program
        .functions
        .iter()
        .map(|function| function.name.name.as_str())
        .collect();
    assert_eq!(names, vec!["f", "f#1", "f#2"]);
    assert_eq!(program.function("f#1").map(|f| f.args.len()), Some(1));
}

#[test]
fn test_first_definition_is_used_for_calls() {
    let mut program = Program::new(
        vec![
            function("f", vec![], vec![]),
            function("f", vec![arg("x")], vec![]),
        ],
        vec![],
        main_with(vec![Stmt::expression(Expr::call("f", vec![], at(51)))]),
    );

    let errors = run(&mut program);

    // only the redefinition, the zero-argument call matches the first `f`
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_duplicate_pattern_is_renamed() {
    let pattern = || {
        PatternDeclaration::new(
            ident("p", 3),
            ident("x", 3),
            vec![(Expr::bool(true, at(3)), Expr::identifier("x", at(3)))],
        )
    };
    let mut program = Program::new(vec![], vec![pattern(), pattern()], main_with(vec![]));

    let errors = run(&mut program);

    assert_eq!(
        errors,
        vec![ErrorImpl::RedefinitionOfPattern {
            pattern: "p".to_string()
        }]
    );
    assert_eq!(program.patterns[1].name.name, "p#1");
}

#[test]
fn test_undeclared_variable() {
    let errors = run_main(vec![Stmt::put(Expr::identifier("x", at(51)))]);

    assert_eq!(
        errors,
        vec![ErrorImpl::VariableNotDeclared {
            variable: "x".to_string()
        }]
    );
}

#[test]
fn test_assignment_declares() {
    let errors = run_main(vec![
        Stmt::assign("x", Expr::int(1, at(51)), at(51)),
        Stmt::put(Expr::identifier("x", at(52))),
    ]);

    assert!(errors.is_empty());
}

#[test]
fn test_compound_assignment_requires_declaration() {
    let errors = run_main(vec![Stmt::assign_with(
        "x",
        None,
        AssignOperator::PlusAssign,
        Expr::int(1, at(51)),
        at(51),
    )]);

    assert_eq!(
        errors,
        vec![ErrorImpl::VariableNotDeclared {
            variable: "x".to_string()
        }]
    );
}

#[test]
fn test_branch_declaration_not_visible_after_if() {
    let errors = run_main(vec![
        Stmt::if_else(
            vec![Expr::bool(true, at(51))],
            vec![Stmt::assign("y", Expr::int(1, at(52)), at(52))],
            vec![],
            at(51),
        ),
        Stmt::put(Expr::identifier("y", at(54))),
    ]);

    assert_eq!(
        errors,
        vec![ErrorImpl::VariableNotDeclared {
            variable: "y".to_string()
        }]
    );
}

#[test]
fn test_then_declaration_not_visible_in_else() {
    let errors = run_main(vec![Stmt::if_else(
        vec![Expr::bool(true, at(51))],
        vec![Stmt::assign("y", Expr::int(1, at(52)), at(52))],
        vec![Stmt::put(Expr::identifier("y", at(53)))],
        at(51),
    )]);

    assert_eq!(errors.len(), 1);
}

#[test]
fn test_outer_variable_visible_in_loop() {
    let errors = run_main(vec![
        Stmt::assign("x", Expr::int(1, at(51)), at(51)),
        Stmt::loop_do(
            vec![
                Stmt::assign("x", Expr::int(2, at(53)), at(53)),
                Stmt::break_if(vec![Expr::bool(true, at(54))], at(54)),
            ],
            at(52),
        ),
        Stmt::put(Expr::identifier("x", at(55))),
    ]);

    assert!(errors.is_empty());
}

#[test]
fn test_for_iterator_scoped_to_loop() {
    let errors = run_main(vec![
        Stmt::for_in(
            "i",
            Range::DoubleDot(Box::new(Expr::int(0, at(51))), Box::new(Expr::int(3, at(51)))),
            vec![Stmt::put(Expr::identifier("i", at(52)))],
            at(51),
        ),
        Stmt::put(Expr::identifier("i", at(53))),
    ]);

    assert_eq!(
        errors,
        vec![ErrorImpl::VariableNotDeclared {
            variable: "i".to_string()
        }]
    );
}

#[test]
fn test_main_variables_invisible_in_functions() {
    let mut program = Program::new(
        vec![function(
            "f",
            vec![],
            vec![Stmt::put(Expr::identifier("x", at(2)))],
        )],
        vec![],
        main_with(vec![Stmt::assign("x", Expr::int(1, at(51)), at(51))]),
    );

    assert_eq!(run(&mut program).len(), 1);
}

#[test]
fn test_call_arity_with_defaults() {
    let callee = function("f", vec![arg("a"), arg_with_default("b", 2)], vec![]);
    let call = |count: i64| {
        Stmt::expression(Expr::call(
            "f",
            (0..count).map(|value| Expr::int(value, at(51))).collect(),
            at(51),
        ))
    };
    let mut program = Program::new(
        vec![callee],
        vec![],
        main_with(vec![call(0), call(1), call(2), call(3)]),
    );

    let errors = run(&mut program);

    assert_eq!(
        errors,
        vec![
            ErrorImpl::ArgMisMatch {
                function: "f".to_string(),
                min: 1,
                max: 2,
                received: 0
            },
            ErrorImpl::ArgMisMatch {
                function: "f".to_string(),
                min: 1,
                max: 2,
                received: 3
            },
        ]
    );
}

#[test]
fn test_undeclared_function_and_pointer() {
    let errors = run_main(vec![
        Stmt::expression(Expr::call("missing", vec![], at(51))),
        Stmt::assign("p", Expr::function_pointer("other", at(52)), at(52)),
    ]);

    assert_eq!(
        errors,
        vec![
            ErrorImpl::FunctionNotDeclared {
                function: "missing".to_string()
            },
            ErrorImpl::FunctionNotDeclared {
                function: "other".to_string()
            },
        ]
    );
}

#[test]
fn test_call_through_pointer_variable() {
    let mut program = Program::new(
        vec![function("g", vec![], vec![])],
        vec![],
        main_with(vec![
            Stmt::assign("p", Expr::function_pointer("g", at(51)), at(51)),
            Stmt::expression(Expr::call("p", vec![], at(52))),
        ]),
    );

    assert!(run(&mut program).is_empty());
}

#[test]
fn test_undeclared_pattern() {
    let errors = run_main(vec![Stmt::put(Expr::match_pattern(
        "p",
        Expr::int(1, at(51)),
    ))]);

    assert_eq!(
        errors,
        vec![ErrorImpl::PatternNotDeclared {
            pattern: "p".to_string()
        }]
    );
}

#[test]
fn test_pattern_target_is_declared() {
    let mut program = Program::new(
        vec![],
        vec![PatternDeclaration::new(
            ident("positive", 3),
            ident("n", 3),
            vec![(
                Expr::binary(
                    Expr::identifier("n", at(3)),
                    BinaryOperator::Greater,
                    Expr::int(0, at(3)),
                ),
                Expr::identifier("n", at(3)),
            )],
        )],
        main_with(vec![Stmt::put(Expr::match_pattern(
            "positive",
            Expr::int(4, at(51)),
        ))]),
    );

    assert!(run(&mut program).is_empty());
}

#[test]
fn test_argument_named_like_function() {
    let mut program = Program::new(
        vec![function("f", vec![arg("f")], vec![])],
        vec![],
        main_with(vec![]),
    );

    assert_eq!(
        run(&mut program),
        vec![ErrorImpl::IdenticalArgFunctionName {
            argument: "f".to_string()
        }]
    );
}

#[test]
fn test_lambda_arity_and_scope() {
    let lambda = Expr::lambda(
        vec![arg("a")],
        vec![Stmt::ret(Some(Expr::identifier("a", at(51))), at(51))],
        at(51),
    );
    let errors = run_main(vec![
        Stmt::put(Expr::call_expr(lambda, vec![])),
        Stmt::put(Expr::identifier("a", at(52))),
    ]);

    assert_eq!(
        errors,
        vec![
            ErrorImpl::ArgMisMatch {
                function: "lambda".to_string(),
                min: 1,
                max: 1,
                received: 0
            },
            ErrorImpl::VariableNotDeclared {
                variable: "a".to_string()
            },
        ]
    );
}

#[test]
fn test_default_may_reference_earlier_parameter() {
    let mut program = Program::new(
        vec![function(
            "f",
            vec![
                arg("a"),
                VarDeclaration::with_default(ident("b", 1), Expr::identifier("a", at(1))),
            ],
            vec![],
        )],
        vec![],
        main_with(vec![]),
    );

    assert!(run(&mut program).is_empty());
}
