// Library root for the command-line front end, exposed so the binary stays
// a thin startup sequence and the dispatch/rendering code is testable.

pub mod cli;
pub mod commands;
pub mod report;
