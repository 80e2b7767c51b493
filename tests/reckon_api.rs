//! End-to-end usage of the `reckon` facade
//!
//! Mirrors how an auditable computation is expected to drive a trace:
//! build inputs, record each step as it happens, finalize, then render.

use std::collections::HashMap;

use reckon::{render, Datum, Error, Inputs, Step, Trace, TraceState, Value};

/// ((a + b) * c) - d, recorded step by step
fn complex_computation() -> reckon::Result<Trace> {
    let mut trace = Trace::new("complex-computation", [("a", 5), ("b", 3), ("c", 4), ("d", 2)]);

    trace.add_step(Step::new("add", [("a", 5), ("b", 3)], 8).with_description("Add a and b"))?;
    trace.add_step(
        Step::new("multiply", [("sum", 8), ("c", 4)], 32).with_description("Multiply sum by c"),
    )?;
    trace.add_step(
        Step::new("subtract", [("product", 32), ("d", 2)], 30)
            .with_description("Subtract d from product"),
    )?;
    trace.with_metadata("formula", "((a + b) * c) - d")?;
    trace.set_result(30)?;
    Ok(trace)
}

#[test]
fn test_complex_computation_text() {
    let trace = complex_computation().unwrap();
    let expected = format!(
        "Trace: complex-computation (ID: {})\n\
         Inputs:\n  a: 5\n  b: 3\n  c: 4\n  d: 2\n\
         Steps:\n\
         \x20 1. add: 8 (Add a and b)\n\
         \x20 2. multiply: 32 (Multiply sum by c)\n\
         \x20 3. subtract: 30 (Subtract d from product)\n\
         Result: 30\n",
        trace.id()
    );
    assert_eq!(trace.to_string(), expected);
}

#[test]
fn test_complex_computation_document() {
    let trace = complex_computation().unwrap();
    let doc = render::document(&trace).unwrap();

    assert_eq!(doc["metadata"]["formula"], "((a + b) * c) - d");
    let ops: Vec<&str> = doc["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["operation"].as_str().unwrap())
        .collect();
    assert_eq!(ops, vec!["add", "multiply", "subtract"]);
}

#[test]
fn test_addition_identifier_is_stable() {
    // Fixed expectation: SHA-256("addition" "a" "10" "b" "20"), first 8 bytes
    let trace = Trace::new("addition", [("b", 20), ("a", 10)]);
    assert_eq!(trace.id(), "addition-fcadb8f3b40ef8da");
}

#[test]
fn test_kind_is_not_part_of_identity() {
    let int = Trace::new("t", [("x", Value::wrap(10))]);
    let text = Trace::new("t", [("x", Value::wrap("10"))]);
    assert_eq!(int.id(), text.id());
    assert_ne!(int.inputs()["x"].kind(), text.inputs()["x"].kind());
}

#[test]
fn test_state_machine_from_facade() {
    let mut inputs = HashMap::new();
    inputs.insert("x".to_string(), Value::wrap(1.5));

    let mut trace = Trace::new("scale", &inputs);
    assert_eq!(trace.state(), TraceState::Open);

    trace
        .add_step(Step::new("double", &inputs, 3.0).with_metadata("unit", "m"))
        .unwrap();
    trace.set_result(3.0).unwrap();
    assert_eq!(trace.state(), TraceState::Completed);

    match trace.add_step(Step::new("again", Inputs::new(), 0)) {
        Err(Error::InvalidState { .. }) => {}
        other => panic!("expected InvalidState, got {:?}", other),
    }
    assert_eq!(trace.result().map(Value::data), Some(&Datum::Float(3.0)));
    assert!(trace.to_string().ends_with("Result: 3\n"));
}
