// Application layer: terminal-facing request intake.

pub mod menu;
