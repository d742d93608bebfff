//! different utility modules used throughout the project
/// logger setup and saving of results into csv
pub mod logger;
/// pretty-printing of resolution results and graph state as tables
pub mod report;
/// parse problem documents like "equations name: lhs = rhs values T1: 300 unknowns targets: T2" into a constraint graph
pub mod task_parser;
