pub mod repl;
pub mod save;
pub mod search;
