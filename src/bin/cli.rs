use std::io::{self, Write};
use std::str::FromStr;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::reload;
use wcag_schedule::{
    ComponentStatistics, CriterionStatistics, Dataset, JsonResultStore, LevelFilter,
    ReportMetadata, ResultStore, ScheduleOptions, TestResult, TestResults, TestStatus,
    build_component_schedule, build_criterion_schedule,
    export::{component_markdown, criterion_markdown},
    load_dataset, save_component_schedule_to_json, save_criterion_schedule_to_json,
    save_results_csv,
};

type LogHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const QUIET_FILTER: &str = "wcag_schedule=warn";
const VERBOSE_FILTER: &str = "wcag_schedule=debug";

fn init_logging() -> LogHandle {
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(QUIET_FILTER));
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
    handle
}

struct Session {
    dataset: Option<Dataset>,
    options: ScheduleOptions,
    results: TestResults,
    metadata: ReportMetadata,
}

impl Session {
    fn new() -> Self {
        Self {
            dataset: None,
            options: ScheduleOptions::default(),
            results: TestResults::new(),
            metadata: ReportMetadata::default(),
        }
    }

    fn dataset(&self) -> Option<&Dataset> {
        if self.dataset.is_none() {
            println!("No dataset loaded. Use: load <dataset.json>");
        }
        self.dataset.as_ref()
    }
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  load <path>                        Load a WCAG criteria dataset (JSON)\n  levels <A|AA|AAA>...               Set the level filter (e.g. levels A AA)\n  advisory <on|off>                  Include advisory techniques in reports\n  failures <on|off>                  Include failure techniques in reports\n  options show                       Show current options\n  options load <json_path>           Load options from JSON file\n  options save <json_path>           Save options to JSON file\n  verbose <on|off>                   Toggle debug logging\n  criteria                           List the criterion schedule\n  components                         List the component schedule\n  stats                              Show schedule statistics\n  report <criteria|components> <path>\n                                     Write a Markdown report\n  save <criteria|components> <path>  Write the schedule as JSON\n  result <sc_id> <pass|fail|na|untested> [notes...]\n                                     Record a test result\n  results show                       List recorded results\n  results save <json_path>           Save recorded results\n  results load <json_path>           Load recorded results\n  results csv <path>                 Export results as CSV\n  quit|exit                          Exit"
    );
}

fn print_options(options: &ScheduleOptions) {
    println!("Levels             : {}", options.levels);
    println!("Include advisory   : {}", options.include_advisory);
    println!("Include failures   : {}", options.include_failures);
}

fn parse_switch(value: Option<&str>) -> Option<bool> {
    match value.map(|v| v.to_ascii_lowercase()) {
        Some(v) if v == "on" || v == "true" => Some(true),
        Some(v) if v == "off" || v == "false" => Some(false),
        _ => None,
    }
}

fn print_criteria(dataset: &Dataset, options: &ScheduleOptions, results: &TestResults) {
    let items = build_criterion_schedule(dataset, &options.levels);
    for item in &items {
        println!(
            "{:<8} {:<4} {:>4} min  {:<14} {}",
            item.sc_number,
            item.level.as_str(),
            item.estimated_time,
            results.status_for(&item.id).label(),
            item.title
        );
    }
    println!("{} criteria", items.len());
}

fn print_components(dataset: &Dataset, options: &ScheduleOptions) {
    let categories = build_component_schedule(dataset, &options.levels);
    for category in &categories {
        println!("{} ({} min)", category.name, category.total_time);
        for component in &category.components {
            let element = component.html_element.as_deref().unwrap_or("-");
            println!(
                "  {:<20} {:<12} {:>3} techniques {:>4} min",
                component.component,
                element,
                component.techniques.len(),
                component.estimated_time
            );
        }
    }
    println!("{} categories", categories.len());
}

fn print_stats(dataset: &Dataset, options: &ScheduleOptions, results: &TestResults) {
    let items = build_criterion_schedule(dataset, &options.levels);
    let criteria = CriterionStatistics::compute(&items, options);
    let components = ComponentStatistics::compute(&build_component_schedule(dataset, &options.levels));
    println!("Success criteria   : {}", criteria.total_criteria);
    println!(
        "By level           : A={} AA={} AAA={}",
        criteria.level_a, criteria.level_aa, criteria.level_aaa
    );
    println!("Sufficient         : {}", criteria.sufficient_techniques);
    if options.include_advisory {
        println!("Advisory           : {}", criteria.advisory_techniques);
    }
    if options.include_failures {
        println!("Failures           : {}", criteria.failure_techniques);
    }
    println!(
        "Criterion time     : {} hours ({} minutes)",
        criteria.estimated_hours, criteria.estimated_minutes
    );
    println!(
        "Components         : {} in {} categories",
        components.total_components, components.total_categories
    );
    println!(
        "Component time     : {} hours ({} minutes)",
        components.estimated_hours, components.estimated_minutes
    );
    println!(
        "Results recorded   : {} (pass={} fail={} n/a={})",
        results.len(),
        results.count(TestStatus::Pass),
        results.count(TestStatus::Fail),
        results.count(TestStatus::NotApplicable)
    );
}

fn main() {
    let log_handle = init_logging();
    let mut session = Session::new();

    println!("WCAG Schedule (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "load" => match parts.next() {
                Some(path) => match load_dataset(path) {
                    Ok(dataset) => {
                        println!(
                            "Loaded {} principles, {} success criteria from {}",
                            dataset.principles.len(),
                            dataset.criterion_count(),
                            path
                        );
                        session.dataset = Some(dataset);
                    }
                    Err(e) => println!("Error loading dataset: {}", e),
                },
                None => println!("Usage: load <path>"),
            },
            "levels" => {
                let rest = parts.collect::<Vec<_>>().join(" ");
                match LevelFilter::parse_list(&rest) {
                    Ok(levels) => {
                        session.options.levels = levels;
                        println!("Levels set to {}", session.options.levels);
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            "advisory" | "failures" => match parse_switch(parts.next()) {
                Some(value) => {
                    if cmd == "advisory" {
                        session.options.include_advisory = value;
                    } else {
                        session.options.include_failures = value;
                    }
                    println!("{} {}", cmd, if value { "on" } else { "off" });
                }
                None => println!("Usage: {} <on|off>", cmd),
            },
            "verbose" => match parse_switch(parts.next()) {
                Some(value) => {
                    let filter = if value { VERBOSE_FILTER } else { QUIET_FILTER };
                    match log_handle.reload(EnvFilter::new(filter)) {
                        Ok(_) => println!("Verbose logging {}", if value { "on" } else { "off" }),
                        Err(e) => println!("Error: {}", e),
                    }
                }
                None => println!("Usage: verbose <on|off>"),
            },
            "options" => match (parts.next(), parts.next()) {
                (Some("show"), _) => print_options(&session.options),
                (Some("load"), Some(path)) => match ScheduleOptions::load_from_json(path) {
                    Ok(options) => {
                        session.options = options;
                        println!("Options loaded from {}", path);
                        print_options(&session.options);
                    }
                    Err(e) => println!("Error loading options: {}", e),
                },
                (Some("save"), Some(path)) => match session.options.save_to_json(path) {
                    Ok(_) => println!("Options saved to {}", path),
                    Err(e) => println!("Error saving options: {}", e),
                },
                _ => println!("Usage: options <show|load <path>|save <path>>"),
            },
            "criteria" => {
                if let Some(dataset) = session.dataset() {
                    print_criteria(dataset, &session.options, &session.results);
                }
            }
            "components" => {
                if let Some(dataset) = session.dataset() {
                    print_components(dataset, &session.options);
                }
            }
            "stats" => {
                if let Some(dataset) = session.dataset() {
                    print_stats(dataset, &session.options, &session.results);
                }
            }
            "report" | "save" => {
                let kind = parts.next();
                let path = parts.next();
                let (Some(kind), Some(path)) = (kind, path) else {
                    println!("Usage: {} <criteria|components> <path>", cmd);
                    continue;
                };
                let Some(dataset) = session.dataset() else {
                    continue;
                };
                let options = &session.options;
                let metadata = &session.metadata;
                let outcome = match (cmd, kind) {
                    ("report", "criteria") => {
                        let items = build_criterion_schedule(dataset, &options.levels);
                        std::fs::write(path, criterion_markdown(&items, options, metadata))
                            .map_err(|e| e.to_string())
                    }
                    ("report", "components") => {
                        let categories = build_component_schedule(dataset, &options.levels);
                        std::fs::write(path, component_markdown(&categories, options, metadata))
                            .map_err(|e| e.to_string())
                    }
                    ("save", "criteria") => {
                        let items = build_criterion_schedule(dataset, &options.levels);
                        save_criterion_schedule_to_json(&items, options, metadata, path)
                            .map_err(|e| e.to_string())
                    }
                    ("save", "components") => {
                        let categories = build_component_schedule(dataset, &options.levels);
                        save_component_schedule_to_json(&categories, options, metadata, path)
                            .map_err(|e| e.to_string())
                    }
                    _ => {
                        println!("Unknown schedule '{}'. Expected criteria or components.", kind);
                        continue;
                    }
                };
                match outcome {
                    Ok(_) => println!("Schedule written to {}", path),
                    Err(e) => println!("Error writing schedule: {}", e),
                }
            }
            "result" => {
                let id = parts.next();
                let status = parts.next();
                match (id, status) {
                    (Some(id), Some(status)) => {
                        let status = match TestStatus::from_str(status) {
                            Ok(s) => s,
                            Err(e) => {
                                println!("Error: {}", e);
                                continue;
                            }
                        };
                        let known = session
                            .dataset
                            .as_ref()
                            .map(|d| d.criteria().any(|ctx| ctx.criterion.id == id))
                            .unwrap_or(false);
                        if !known {
                            println!("Unknown success criterion '{}'.", id);
                            continue;
                        }
                        let notes = parts.collect::<Vec<_>>().join(" ");
                        let mut result = TestResult::new(status, notes);
                        result.tested_on = Some(chrono::Local::now().date_naive());
                        session.results.record(id, result);
                        println!("Recorded {} for {}.", status, id);
                    }
                    _ => println!("Usage: result <sc_id> <pass|fail|na|untested> [notes...]"),
                }
            }
            "results" => match (parts.next(), parts.next()) {
                (Some("show"), _) => {
                    if session.results.is_empty() {
                        println!("No results recorded.");
                    }
                    for (id, result) in session.results.iter() {
                        println!("{:<40} {:<14} {}", id, result.status.label(), result.notes);
                    }
                }
                (Some("save"), Some(path)) => {
                    match JsonResultStore::new(path).save_results(&session.results) {
                        Ok(_) => println!("Results saved to {}", path),
                        Err(e) => println!("Error saving results: {}", e),
                    }
                }
                (Some("load"), Some(path)) => match JsonResultStore::new(path).load_results() {
                    Ok(Some(results)) => {
                        println!("Loaded {} results from {}", results.len(), path);
                        session.results = results;
                    }
                    Ok(None) => println!("No results stored at {}", path),
                    Err(e) => println!("Error loading results: {}", e),
                },
                (Some("csv"), Some(path)) => {
                    let Some(dataset) = session.dataset() else {
                        continue;
                    };
                    let items = build_criterion_schedule(dataset, &session.options.levels);
                    match save_results_csv(&items, &session.results, path) {
                        Ok(_) => println!("Results exported to {}", path),
                        Err(e) => println!("Error exporting results: {}", e),
                    }
                }
                _ => println!("Usage: results <show|save <path>|load <path>|csv <path>>"),
            },
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
