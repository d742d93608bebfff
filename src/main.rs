#![allow(non_snake_case)]
use RustedThermo::Utils::logger::{init_logger, save_resolution_to_csv};
use RustedThermo::Utils::report::{graph_table, resolution_table};
use RustedThermo::Utils::task_parser::ProblemTask;
use RustedThermo::errors::TaskError;
use log::{error, info};
use std::env;
use std::process::ExitCode;

/// isentropic compression of air, run when no task file is given
const DEMO_TASK: &str = include_str!("../demos/isentropic_compression.txt");

fn load_task(path: Option<&str>) -> Result<ProblemTask, TaskError> {
    match path {
        Some(path) => ProblemTask::from_file(path),
        None => DEMO_TASK.parse(),
    }
}

/// usage: RustedThermo [task-file] [csv-output]
fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let task_path = args.first().map(String::as_str);
    let csv_path = args.get(1);

    let mut task = match load_task(task_path) {
        Ok(task) => task,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    init_logger(&task.config);
    info!(
        "task {} with {} equations",
        task_path.unwrap_or("<isentropic compression demo>"),
        task.graph.equation_names().len()
    );

    let resolutions = task.run();
    println!("{}", resolution_table(&resolutions));
    println!("{}", graph_table(&task.graph));

    if let Some(csv_path) = csv_path {
        if let Err(err) = save_resolution_to_csv(&resolutions, csv_path) {
            error!("cannot write {}: {}", csv_path, err);
            return ExitCode::FAILURE;
        }
        info!("results saved to {}", csv_path);
    }
    ExitCode::SUCCESS
}
