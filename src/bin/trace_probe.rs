use std::env;
use std::thread;
use std::time::Instant;

use algo_stepper::adapter::Style;
use algo_stepper::registry::catalog;
use algo_stepper::replay::first_divergence;
use algo_stepper::{
    AlgorithmId, Category, Frame, Input, ManualScheduler, Snapshot, Status, TickScheduler,
    Trace, Update, Visualizer, VisualizerBuilder, WallClockScheduler,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use sysinfo::{get_current_pid, ProcessRefreshKind, System};
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("trace_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    let result = match options.command {
        Command::List => list(&options),
        Command::Trace => print_trace(&options),
        Command::Play => play(&options),
        Command::Probe => probe(&options),
    };
    if let Err(err) = result {
        eprintln!("trace_probe: {err}");
        std::process::exit(1);
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Command {
    List,
    Trace,
    Play,
    Probe,
}

struct Options {
    command: Command,
    algorithm: Option<String>,
    format: OutputFormat,
    size: Option<usize>,
    seed: u64,
    speed: Option<f64>,
    input: Option<Vec<i64>>,
    target: Option<i64>,
    verify_limit: usize,
}

fn next_value<I, T>(args: &mut I, flag: &str) -> Result<String, String>
where
    I: Iterator<Item = T>,
    T: Into<String>,
{
    args.next()
        .map(Into::into)
        .ok_or_else(|| format!("missing value after {flag}"))
}

fn parse_number<N: std::str::FromStr>(value: &str, what: &str) -> Result<N, String> {
    value
        .trim()
        .parse::<N>()
        .map_err(|_| format!("{what} must be a number, got '{value}'"))
}

fn parse_keys(value: &str) -> Result<Vec<i64>, String> {
    value
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| parse_number::<i64>(s, "every input key"))
        .collect()
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut command = None;
        let mut algorithm = None;
        let mut format = OutputFormat::Table;
        let mut size = None;
        let mut seed = 0x5EED;
        let mut speed = None;
        let mut input = None;
        let mut target = None;
        let mut verify_limit = 64usize;

        while let Some(arg) = args.next() {
            let arg: String = arg.into();
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => {
                    (flag.to_string(), Some(value.to_string()))
                }
                _ => (arg.clone(), None),
            };
            let mut value = |flag: &str| match &inline {
                Some(v) => Ok(v.clone()),
                None => next_value(&mut args, flag),
            };
            match flag.as_str() {
                "--help" | "-h" => {
                    Options::print_help();
                    std::process::exit(0);
                }
                "--format" => format = OutputFormat::from_str(&value("--format")?)?,
                "--size" => size = Some(parse_number(&value("--size")?, "size")?),
                "--seed" => seed = parse_number(&value("--seed")?, "seed")?,
                "--speed" => speed = Some(parse_number(&value("--speed")?, "speed")?),
                "--input" => input = Some(parse_keys(&value("--input")?)?),
                "--target" => target = Some(parse_number(&value("--target")?, "target")?),
                "--verify-limit" => {
                    verify_limit = parse_number(&value("--verify-limit")?, "verify limit")?
                }
                other if other.starts_with('-') => {
                    return Err(format!("unrecognized argument '{other}'"))
                }
                word if command.is_none() => {
                    command = Some(match word {
                        "list" => Command::List,
                        "trace" => Command::Trace,
                        "play" => Command::Play,
                        "probe" => Command::Probe,
                        other => return Err(format!("unknown command '{other}'")),
                    })
                }
                word if algorithm.is_none() => algorithm = Some(word.to_string()),
                other => return Err(format!("unexpected argument '{other}'")),
            }
        }

        let command = command.ok_or_else(|| "missing command".to_string())?;
        if matches!(command, Command::Trace | Command::Play) && algorithm.is_none() {
            return Err("missing algorithm id".to_string());
        }
        Ok(Self {
            command,
            algorithm,
            format,
            size,
            seed,
            speed,
            input,
            target,
            verify_limit,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin trace_probe -- <command> [algorithm] [options]

Commands:
  list                          List registered algorithms
  trace <algorithm>             Print every step of one run
  play <algorithm>              Play a run in the terminal at --speed steps per second
  probe                         Time every algorithm over growing random inputs

Options:
  --format <csv|table|json>     Output format (default: table)
  --size <N>                    Random input of N elements (probe: largest size, default 128)
  --seed <N>                    Seed for random inputs (default: 24301)
  --speed <F>                   Playback speed in steps per second (default: 25)
  --input <k1,k2,...>           Explicit keys (sorting and binary search)
  --target <N>                  Key to look for (binary search)
  --verify-limit <N>            Largest probe size whose trace is replay-checked (default: 64)
  -h, --help                    Print this help message

Examples:
  cargo run --bin trace_probe -- list
  cargo run --bin trace_probe -- trace bubble-sort --input 64,34,25,12,22,11,90
  cargo run --bin trace_probe -- play dijkstra --size 8 --speed 4
  RUST_LOG=algo_stepper=debug cargo run --bin trace_probe -- probe --format csv
"
        );
    }
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

fn list(options: &Options) -> Result<(), String> {
    let infos = catalog();
    match options.format {
        OutputFormat::Json => to_json(&infos),
        OutputFormat::Csv => {
            println!("id,name,category,time,space,best,worst,stable");
            for i in &infos {
                println!(
                    "{},{},{},{},{},{},{},{}",
                    i.id,
                    i.name,
                    i.category.label(),
                    i.time_complexity,
                    i.space_complexity,
                    i.best_case,
                    i.worst_case,
                    i.stable.map_or("-", |s| if s { "yes" } else { "no" })
                );
            }
            Ok(())
        }
        OutputFormat::Table => {
            let col = infos.iter().map(|i| i.id.len()).max().unwrap_or(2).max(2);
            println!("{:<col$}  {:<22}  {:<8}  {:>16}  {:>8}", "id", "name", "category", "time", "space");
            println!("{:-<col$}  {:-<22}  {:-<8}  {:->16}  {:->8}", "", "", "", "", "");
            for i in &infos {
                println!(
                    "{:<col$}  {:<22}  {:<8}  {:>16}  {:>8}",
                    i.id,
                    i.name,
                    i.category.label(),
                    i.time_complexity,
                    i.space_complexity
                );
            }
            Ok(())
        }
    }
}

/// Build a visualizer configured from the command line, with the requested
/// input already loaded.
fn visualizer<S: TickScheduler>(options: &Options, scheduler: S) -> Result<Visualizer<S>, String> {
    let id = options.algorithm.as_deref().unwrap_or("bubble-sort");
    let algorithm = AlgorithmId::lookup(id).map_err(|e| e.to_string())?;
    let mut builder = VisualizerBuilder::new(scheduler)
        .with_algorithm(id)
        .with_seed(options.seed);
    if let Some(speed) = options.speed {
        builder = builder.with_speed(speed);
    }
    if let Some(keys) = &options.input {
        let input = match algorithm.category() {
            Category::Sorting => Input::keys(keys.clone()),
            Category::Search => {
                let target = options
                    .target
                    .ok_or_else(|| "--target is required with --input for binary search".to_string())?;
                Input::search(keys.clone(), target)
            }
            Category::Graph => {
                return Err(format!("{id} takes a random graph; use --size instead of --input"))
            }
        };
        builder = builder.with_input(input);
    }
    let mut vis = builder.build().map_err(|e| e.to_string())?;
    if options.input.is_none() {
        if let Some(size) = options.size {
            accept(vis.randomize_input(size))?;
        }
    }
    Ok(vis)
}

fn accept(update: Result<Update, algo_stepper::EngineError>) -> Result<(), String> {
    match update.map_err(|e| e.to_string())? {
        Update::Frame(_) => Ok(()),
        Update::Rejected(msg) => Err(msg.message),
    }
}

fn print_trace(options: &Options) -> Result<(), String> {
    let vis = visualizer(options, ManualScheduler::new())?;
    let trace = vis
        .trace()
        .ok_or_else(|| "no trace was produced".to_string())?;
    match options.format {
        OutputFormat::Json => to_json(&**trace),
        OutputFormat::Csv => {
            println!("index,kind,operands,value,note");
            for s in trace.steps() {
                let ops: Vec<String> = s.operands.iter().map(|o| o.to_string()).collect();
                println!(
                    "{},{},\"{}\",{},\"{}\"",
                    s.index,
                    s.kind.name(),
                    ops.join(" "),
                    s.value.map(|v| v.to_string()).unwrap_or_default(),
                    s.note.replace('"', "'")
                );
            }
            Ok(())
        }
        OutputFormat::Table => {
            write_trace_table(trace);
            Ok(())
        }
    }
}

fn write_trace_table(trace: &Trace) {
    let width = trace.len().to_string().len().max(5);
    println!("{:>width$}  {:<9}  {:<14}  {:>6}  note", "index", "kind", "operands", "value");
    println!("{:->width$}  {:-<9}  {:-<14}  {:->6}  {:-<20}", "", "", "", "", "");
    for s in trace.steps() {
        println!(
            "{:>width$}  {:<9}  {:<14}  {:>6}  {}",
            s.index,
            s.kind.name(),
            format!("{:?}", s.operands),
            s.value.map(|v| v.to_string()).unwrap_or_default(),
            s.note
        );
    }
    if let Some(done) = trace.terminal() {
        println!();
        println!("final: {}", render_snapshot(&done.snapshot, &[]));
    }
}

fn style_marker(style: Style) -> char {
    match style {
        Style::Compared => '?',
        Style::Swapped => '*',
        Style::Visited => '.',
        Style::Current => '>',
        Style::Normal => ' ',
    }
}

fn render_snapshot(snapshot: &Snapshot, markers: &[char]) -> String {
    let mark = |i: usize| markers.get(i).copied().unwrap_or(' ');
    match snapshot {
        Snapshot::Array { keys } => keys
            .iter()
            .enumerate()
            .map(|(i, k)| format!("{}{k:>3}", mark(i)))
            .collect::<Vec<_>>()
            .join(" "),
        Snapshot::Search(s) => {
            let keys: Vec<String> = s
                .keys
                .iter()
                .enumerate()
                .map(|(i, k)| format!("{}{k:>3}", mark(i)))
                .collect();
            let result = match s.result {
                Some(r) => format!("  result {r}"),
                None => String::new(),
            };
            format!("{}  target {}{result}", keys.join(" "), s.target)
        }
        Snapshot::Graph(g) => {
            let nodes: Vec<String> = g
                .dist
                .iter()
                .enumerate()
                .map(|(n, d)| match d {
                    Some(d) => format!("{}{n}:{d}", mark(n)),
                    None => format!("{}{n}:-", mark(n)),
                })
                .collect();
            if g.path.is_empty() {
                nodes.join(" ")
            } else {
                format!("{}  path {:?}", nodes.join(" "), g.path)
            }
        }
    }
}

fn render_frame(frame: &Frame) -> String {
    let mut markers = vec![' '; frame.current_snapshot.len()];
    for a in &frame.current_annotations {
        for &p in &a.target_positions {
            if let Some(m) = markers.get_mut(p) {
                *m = style_marker(a.style);
            }
        }
    }
    let state = &frame.playback_state;
    format!(
        "[{:>4}/{:<4}] {}",
        state.cursor + 1,
        state.trace_len,
        render_snapshot(&frame.current_snapshot, &markers)
    )
}

fn play(options: &Options) -> Result<(), String> {
    let mut vis = visualizer(options, WallClockScheduler::new())?;
    let info = vis.algorithm().info();
    eprintln!(
        "{} ({}, {} average), {:.1} steps/s",
        info.name,
        info.category.label(),
        info.time_complexity,
        vis.controller().speed()
    );
    eprintln!("markers: ? compared, * written, . visited, > current");

    let first = vis.frame().map_err(|e| e.to_string())?;
    println!("{}", render_frame(&first));
    vis.play().map_err(|e| e.to_string())?;
    while let Some(wait) = vis.scheduler_mut().time_until_next() {
        thread::sleep(wait);
        if let Some(frame) = vis.pump().map_err(|e| e.to_string())? {
            let note = vis
                .controller()
                .current_step()
                .map(|s| s.note.as_str())
                .unwrap_or("");
            println!("{}  {note}", render_frame(&frame));
            if frame.playback_state.status == Status::Finished {
                break;
            }
        }
    }
    Ok(())
}

#[derive(Clone, Serialize)]
struct Measurement {
    algorithm: &'static str,
    size: usize,
    steps: usize,
    wall_s: f64,
    rss_delta_kib: u64,
    replay: &'static str,
    detail: Option<String>,
}

fn probe(options: &Options) -> Result<(), String> {
    let max = options.size.unwrap_or(128).max(1);
    let mut sizes = Vec::new();
    let mut n = 8usize.min(max);
    while n < max {
        sizes.push(n);
        n *= 4;
    }
    sizes.push(max);

    eprintln!("{}", "=".repeat(72));
    eprintln!("Trace probe: step counts, wall time and memory per algorithm");
    eprintln!("  sizes: {sizes:?}, replay checked up to {}", options.verify_limit);
    eprintln!("{}", "=".repeat(72));

    let mut sys = System::new();
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut measurements = Vec::new();
    let total = AlgorithmId::ALL.len();
    for (k, algorithm) in AlgorithmId::ALL.into_iter().enumerate() {
        eprintln!("[{}/{total}] {}", k + 1, algorithm.info().name);
        for &size in &sizes {
            let input = algorithm.generate(size, &mut rng);
            let before = rss_kib(&mut sys);
            let start = Instant::now();
            let trace = algorithm.run(&input).map_err(|e| e.to_string())?;
            let wall_s = start.elapsed().as_secs_f64();
            let after = rss_kib(&mut sys);

            let (replay, detail) = if size > options.verify_limit {
                ("not_checked", None)
            } else {
                match first_divergence(&trace) {
                    Ok(None) => ("passed", None),
                    Ok(Some(d)) => ("failed", Some(format!("{d:?}"))),
                    Err(e) => ("failed", Some(e.to_string())),
                }
            };
            eprintln!("      size={size:<6} steps={:<8} {replay}", trace.len());
            measurements.push(Measurement {
                algorithm: algorithm.id(),
                size,
                steps: trace.len(),
                wall_s,
                rss_delta_kib: after.saturating_sub(before),
                replay,
                detail,
            });
        }
    }

    match options.format {
        OutputFormat::Json => to_json(&measurements),
        OutputFormat::Csv => {
            println!("algorithm,size,steps,wall_s,rss_delta_kib,replay,detail");
            for m in &measurements {
                println!(
                    "{},{},{},{:.6},{},{},\"{}\"",
                    m.algorithm,
                    m.size,
                    m.steps,
                    m.wall_s,
                    m.rss_delta_kib,
                    m.replay,
                    m.detail.as_deref().unwrap_or("")
                );
            }
            Ok(())
        }
        OutputFormat::Table => {
            println!(
                "{:<15}  {:>6}  {:>9}  {:>10}  {:>14}  {}",
                "algorithm", "size", "steps", "wall_s", "rss_delta_kib", "replay"
            );
            println!("{:-<15}  {:->6}  {:->9}  {:->10}  {:->14}  {:-<11}", "", "", "", "", "", "");
            for m in &measurements {
                println!(
                    "{:<15}  {:>6}  {:>9}  {:>10.6}  {:>14}  {}",
                    m.algorithm, m.size, m.steps, m.wall_s, m.rss_delta_kib, m.replay
                );
            }
            Ok(())
        }
    }
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    match get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        Some(process) => process.memory() / 1024,
        None => 0,
    }
}
