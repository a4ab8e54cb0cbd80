//! Color arguments and the temporary color-scale switch.

mod common;

use common::{Call, SpyAgent};
use turtlesc::{
    resolve_color, run, ColorScale, ColorTarget, ColorValue, DrawingAgent, HeadlessTurtle,
    ShortcutError, SyntaxErrorKind,
};

fn error_kind(spy: &mut SpyAgent, text: &str) -> SyntaxErrorKind {
    run(spy, &[text]).unwrap_err().as_syntax().unwrap().kind
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn test_resolve_hex_in_each_scale() {
    assert_eq!(
        resolve_color(&["ff0000"], ColorScale::Fractional).unwrap(),
        ColorValue::Rgb(1.0, 0.0, 0.0)
    );
    assert_eq!(
        resolve_color(&["#FF0000"], ColorScale::Integer).unwrap(),
        ColorValue::Rgb(255.0, 0.0, 0.0)
    );
}

#[test]
fn test_resolve_triple_is_verbatim() {
    assert_eq!(
        resolve_color(&["255", "0", "0"], ColorScale::Fractional).unwrap(),
        ColorValue::Rgb(255.0, 0.0, 0.0)
    );
    assert_eq!(
        resolve_color(&["0.5", "0", "1"], ColorScale::Integer).unwrap(),
        ColorValue::Rgb(0.5, 0.0, 1.0)
    );
}

// =============================================================================
// No switch
// =============================================================================

#[test]
fn test_hex_never_switches_scale() {
    let mut spy = SpyAgent::new().with_scale(ColorScale::Integer);
    run(&mut spy, &["pc #00ff00"]).unwrap();
    assert_eq!(
        spy.calls(),
        vec![Call::SetColor(ColorTarget::Pen, ColorValue::Rgb(0.0, 255.0, 0.0))]
    );
}

#[test]
fn test_named_color_never_switches_scale() {
    let mut spy = SpyAgent::new().with_scale(ColorScale::Integer);
    run(&mut spy, &["fc RED"]).unwrap();
    assert_eq!(
        spy.calls(),
        vec![Call::SetColor(ColorTarget::Fill, ColorValue::Named("red".into()))]
    );
}

#[test]
fn test_triple_matching_scale_does_not_switch() {
    let mut spy = SpyAgent::new();
    run(&mut spy, &["bc 0 0.5 1"]).unwrap();
    assert_eq!(
        spy.calls(),
        vec![Call::SetColor(ColorTarget::Background, ColorValue::Rgb(0.0, 0.5, 1.0))]
    );

    let mut spy = SpyAgent::new().with_scale(ColorScale::Integer);
    run(&mut spy, &["bc 10 20 255"]).unwrap();
    assert_eq!(
        spy.calls(),
        vec![Call::SetColor(ColorTarget::Background, ColorValue::Rgb(10.0, 20.0, 255.0))]
    );
}

// =============================================================================
// Temporary switch
// =============================================================================

#[test]
fn test_integer_triple_on_fractional_agent() {
    let mut spy = SpyAgent::new();
    assert_eq!(run(&mut spy, &["pc 255 0 0"]).unwrap(), 1);
    assert_eq!(
        spy.calls(),
        vec![
            Call::SetColorScale(ColorScale::Integer),
            Call::SetColor(ColorTarget::Pen, ColorValue::Rgb(255.0, 0.0, 0.0)),
            Call::SetColorScale(ColorScale::Fractional),
        ]
    );
    assert_eq!(spy.color_scale(), ColorScale::Fractional);
}

#[test]
fn test_integer_switch_truncates_components() {
    let mut spy = SpyAgent::new();
    run(&mut spy, &["pc 128.9 0.5 2"]).unwrap();
    assert_eq!(
        spy.calls()[1],
        Call::SetColor(ColorTarget::Pen, ColorValue::Rgb(128.0, 0.0, 2.0))
    );
}

#[test]
fn test_fractional_triple_on_integer_agent() {
    let mut spy = SpyAgent::new().with_scale(ColorScale::Integer);
    run(&mut spy, &["fc 0.5 0.25 1"]).unwrap();
    assert_eq!(
        spy.calls(),
        vec![
            Call::SetColorScale(ColorScale::Fractional),
            Call::SetColor(ColorTarget::Fill, ColorValue::Rgb(0.5, 0.25, 1.0)),
            Call::SetColorScale(ColorScale::Integer),
        ]
    );
    assert_eq!(spy.color_scale(), ColorScale::Integer);
}

#[test]
fn test_scale_restored_when_agent_fails() {
    let mut spy = SpyAgent::new().failing_set_color();
    let err = run(&mut spy, &["pc 255 0 0, f 1"]).unwrap_err();

    assert!(matches!(err, ShortcutError::Agent(_)));
    assert_eq!(
        spy.calls(),
        vec![
            Call::SetColorScale(ColorScale::Integer),
            Call::SetColor(ColorTarget::Pen, ColorValue::Rgb(255.0, 0.0, 0.0)),
            Call::SetColorScale(ColorScale::Fractional),
        ]
    );
    assert_eq!(spy.color_scale(), ColorScale::Fractional);
}

#[test]
fn test_integer_scale_restored_when_agent_fails() {
    let mut spy = SpyAgent::new()
        .with_scale(ColorScale::Integer)
        .failing_set_color();
    let err = run(&mut spy, &["bc 0.5 0.25 0, f 1"]).unwrap_err();

    assert!(matches!(err, ShortcutError::Agent(_)));
    assert_eq!(
        spy.calls(),
        vec![
            Call::SetColorScale(ColorScale::Fractional),
            Call::SetColor(ColorTarget::Background, ColorValue::Rgb(0.5, 0.25, 0.0)),
            Call::SetColorScale(ColorScale::Integer),
        ]
    );
    assert_eq!(spy.color_scale(), ColorScale::Integer);
}

#[test]
fn test_headless_turtle_stores_switched_color_in_its_own_scale() {
    let mut turtle = HeadlessTurtle::new();
    run(&mut turtle, &["pc 255 0 0"]).unwrap();
    assert_eq!(turtle.color_scale(), ColorScale::Fractional);
    assert_eq!(turtle.color(ColorTarget::Pen), ColorValue::Rgb(1.0, 0.0, 0.0));
}

// =============================================================================
// Argument errors
// =============================================================================

#[test]
fn test_color_argument_counts() {
    let mut spy = SpyAgent::new();
    assert_eq!(error_kind(&mut spy, "pc"), SyntaxErrorKind::MissingArgument);
    assert_eq!(error_kind(&mut spy, "pc 1 0"), SyntaxErrorKind::InvalidColor);
    assert_eq!(error_kind(&mut spy, "pc 1 0 0 0"), SyntaxErrorKind::TooManyArguments);
    assert!(spy.calls().is_empty());
}

#[test]
fn test_triple_component_must_be_a_number() {
    let mut spy = SpyAgent::new();
    let err = run(&mut spy, &["pc 1 x 0"]).unwrap_err();
    let syntax = err.as_syntax().unwrap();
    assert_eq!(syntax.kind, SyntaxErrorKind::NotANumber);
    assert_eq!(syntax.token, "x");
}

#[test]
fn test_unknown_color_name_is_rejected_before_execution() {
    let mut spy = SpyAgent::new();
    let err = run(&mut spy, &["f 1, pc mauve"]).unwrap_err();
    let syntax = err.as_syntax().unwrap();
    assert_eq!(syntax.kind, SyntaxErrorKind::InvalidColor);
    assert_eq!(syntax.token, "mauve");
    assert!(spy.calls().is_empty());
}

#[test]
fn test_short_hex_is_treated_as_a_name() {
    let mut spy = SpyAgent::new();
    assert_eq!(error_kind(&mut spy, "pc #fff"), SyntaxErrorKind::InvalidColor);
    assert_eq!(error_kind(&mut spy, "pc fffffff"), SyntaxErrorKind::InvalidColor);
}
