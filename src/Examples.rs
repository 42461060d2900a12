/// worked examples of the reaction contribution analysis, run by the binary
pub mod kinetics_examples;
