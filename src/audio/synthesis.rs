//! Glicol composition (procedural music code).

/// Slow pentatonic saw lead over a sparse gate, with an LFO-swept filter.
/// Tuned so the kick of each gate lands clearly in the bass bins.
pub const GLICOL_COMPOSITION: &str = r#"
~gate: speed 1.8 >> seq 48 _48 _~a 36
~a: choose 36 36 36 60 0 0 0
~amp: ~gate >> envperc 0.002 0.12
~pit: ~gate >> mul 130.81
~lead: saw ~pit >> mul ~amp >> lpf ~mod 4.0 >> mul 0.12
~mod: sin 0.15 >> mul 1100 >> add 1300
o: ~lead >> plate 0.12
"#;
