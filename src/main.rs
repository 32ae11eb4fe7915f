// SPDX-FileCopyrightText: 2026 Onflow Contributors
// SPDX-License-Identifier: MIT

//! Onflow CLI entrypoint.
//!
//! Imports a workflow snapshot document, prints its validation report, and
//! optionally recomputes the auto-layout or runs a mock simulation. Exits
//! non-zero when the workflow has validation issues, so it slots into CI.

use std::error::Error;

use onflow::layout;
use onflow::model::WorkflowGraph;
use onflow::sim;
use onflow::validate;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <workflow.json> [--layout] [--simulate]\n\nImports the snapshot document, prints validation findings, and exits 1 when\nany exist.\n\n--layout prints the auto-layout position of every node.\n--simulate runs the mock simulator and prints the execution trace."
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    file: String,
    layout: bool,
    simulate: bool,
}

fn parse_options(args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut file = None;
    let mut layout = false;
    let mut simulate = false;

    for arg in args {
        match arg.as_str() {
            "--layout" => {
                if layout {
                    return Err(());
                }
                layout = true;
            }
            "--simulate" => {
                if simulate {
                    return Err(());
                }
                simulate = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if file.is_some() {
                    return Err(());
                }
                file = Some(arg);
            }
        }
    }

    let file = file.ok_or(())?;
    Ok(CliOptions {
        file,
        layout,
        simulate,
    })
}

fn report_validation(graph: &WorkflowGraph) -> bool {
    let report = validate::validate(graph);

    for issue in report.global_issues() {
        println!("workflow: {issue}");
    }
    for (node_id, issues) in report.per_node() {
        for issue in issues {
            println!("{node_id}: {issue}");
        }
    }

    if report.is_clean() {
        println!(
            "workflow ok ({} nodes, {} edges)",
            graph.nodes().len(),
            graph.edges().len()
        );
    }

    report.is_clean()
}

fn print_layout(graph: &WorkflowGraph) {
    let positions = layout::layout_positions(graph.nodes(), graph.edges());
    for node in graph.nodes() {
        if let Some(position) = positions.get(node.id()) {
            println!(
                "{}: ({}, {})",
                node.id(),
                position.x(),
                position.y()
            );
        }
    }
}

fn print_simulation(graph: &WorkflowGraph) -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let result = runtime.block_on(sim::simulate(graph));

    if result.valid {
        println!("simulation: workflow is valid");
    } else {
        println!("simulation: workflow has validation issues");
        for issue in &result.issues {
            println!("  {issue}");
        }
    }
    for (index, step) in result.steps.iter().enumerate() {
        println!(
            "  {}. {} [{}] {}",
            index + 1,
            step.label,
            step.kind,
            step.message
        );
    }

    Ok(())
}

fn main() {
    let result = (|| -> Result<bool, Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "onflow".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let text = std::fs::read_to_string(&options.file)?;
        let graph = onflow::format::import_snapshot(&text)?;

        let clean = report_validation(&graph);

        if options.layout {
            print_layout(&graph);
        }
        if options.simulate {
            print_simulation(&graph)?;
        }

        Ok(clean)
    })();

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("onflow: {err}");
            std::process::exit(1);
        }
    }
}
