use clap::Parser;
use gridfight_enrich::document::to_pretty_string;
use gridfight_enrich::pipeline::{self, output_name, Paths};
use gridfight_enrich::report::LogReporter;
use log::LevelFilter;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about = "Resolve GridFight text hashes against a TextMap", long_about = None)]
struct Cli {
    /// Directory holding the input tables
    #[arg(short = 'd', long, default_value = ".")]
    dir: PathBuf,

    /// Back-equipment table (relative to --dir)
    #[arg(long, default_value = pipeline::EQUIPMENT_FILE)]
    equipment: PathBuf,

    /// Back-role-rank table (relative to --dir)
    #[arg(long, default_value = pipeline::ROLE_RANK_FILE)]
    role_rank: PathBuf,

    /// TextMap document (relative to --dir)
    #[arg(long, default_value = pipeline::TEXTMAP_FILE)]
    textmap: PathBuf,

    /// Output directory (defaults to --dir)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Don't print a sample record from each output
    #[arg(long)]
    no_sample: bool,

    /// Verbose output (lists every unresolved hash)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn paths(&self) -> Paths {
        let input = |file: &Path| {
            if self.dir == Path::new(".") {
                file.to_path_buf()
            } else {
                self.dir.join(file)
            }
        };
        let out_dir = self.output.as_deref().unwrap_or(self.dir.as_path());
        let output = |file: &Path| {
            let name = output_name(file);
            if out_dir == Path::new(".") {
                name
            } else {
                out_dir.join(name)
            }
        };

        Paths {
            equipment: input(&self.equipment),
            role_rank: input(&self.role_rank),
            textmap: input(&self.textmap),
            equipment_out: output(&self.equipment),
            role_rank_out: output(&self.role_rank),
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stdout)
        .format(|buf, record| match record.level() {
            log::Level::Info | log::Level::Error => writeln!(buf, "{}", record.args()),
            other => writeln!(buf, "[{}] {}", other, record.args()),
        })
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let summary = match pipeline::run(&cli.paths(), &LogReporter) {
        Ok(summary) => summary,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    println!("\nProcessing complete!");
    println!("Equipment entries: {}", summary.equipment.len());
    println!("Rank entries: {}", summary.ranks.len());

    if !cli.no_sample {
        println!("\n--- Sample Equipment Entry ---");
        if let Some(first) = summary.equipment.first() {
            println!("{}", to_pretty_string(first)?);
        }

        println!("\n--- Sample Rank Entry ---");
        if let Some(first) = summary.ranks.first() {
            println!("{}", to_pretty_string(first)?);
        }
    }

    if !summary.is_complete() {
        return Err(format!("{} output file(s) failed to save", summary.write_failures.len()).into());
    }

    Ok(())
}
