use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use log::info;
use qgolden::input::{dummy_bus, parse_bus, read_bus_file};
use qgolden::model::loader::MemPaths;
use qgolden::pack::{pack_file, PACKED_W1_FILE};
use qgolden::report::{render_text, to_json, to_json_line, GoldenRecord};
use qgolden::GoldenNetwork;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Golden reference generator for the quantized MLP accelerator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the golden trace for one bus vector (default: 64 x 127)
    Golden {
        #[command(flatten)]
        mems: MemArgs,
        /// Bus vector, e.g. "[0x10, 0x22, ...]" (IN_DIM bytes)
        #[arg(long)]
        bus: Option<String>,
        /// Emit JSON instead of the text report
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Evaluate a file of bus vectors (one per line) and write JSON lines
    Batch {
        #[command(flatten)]
        mems: MemArgs,
        /// Input file with one bus vector per line
        #[arg(long)]
        input: PathBuf,
        /// Output JSONL file (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Worker threads (0 = rayon default)
        #[arg(long, default_value_t = 0)]
        threads: usize,
    },
    /// Pack W1 into one line per hidden node for the RTL memory load
    Pack {
        #[arg(long, default_value = "W1_q.mem")]
        input: PathBuf,
        #[arg(long, default_value = PACKED_W1_FILE)]
        output: PathBuf,
    },
}

#[derive(ClapArgs, Debug)]
struct MemArgs {
    /// Directory holding W1_q.mem, b1_q.mem, W2_q.mem, b2_q.mem (env: QGOLDEN_MEM_DIR)
    #[arg(long)]
    mem_dir: Option<PathBuf>,
    #[arg(long)]
    w1: Option<PathBuf>,
    #[arg(long)]
    b1: Option<PathBuf>,
    #[arg(long)]
    w2: Option<PathBuf>,
    #[arg(long)]
    b2: Option<PathBuf>,
}

impl MemArgs {
    fn paths(&self) -> MemPaths {
        let mut p = MemPaths::resolve(self.mem_dir.clone());
        if let Some(w1) = &self.w1 { p.w1 = w1.clone(); }
        if let Some(b1) = &self.b1 { p.b1 = b1.clone(); }
        if let Some(w2) = &self.w2 { p.w2 = w2.clone(); }
        if let Some(b2) = &self.b2 { p.b2 = b2.clone(); }
        p
    }

    fn load(&self) -> Result<GoldenNetwork> {
        let paths = self.paths();
        GoldenNetwork::load(&paths).context("load memory images")
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Golden { mems, bus, json } => {
            let net = mems.load()?;
            let (title, bus) = match bus {
                Some(text) => ("TEST: bus_in from --bus", parse_bus("--bus", 1, &text)?),
                None => ("(DUMMY) TEST: bus_in = all 127", dummy_bus()),
            };
            let trace = net.infer(&bus)?;
            if json {
                println!("{}", to_json(&trace)?);
            } else {
                print!("{}", render_text(title, &trace));
            }
        }
        Cmd::Batch { mems, input, output, threads } => {
            let net = mems.load()?;
            let vectors = read_bus_file(&input)?;
            let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build().context("thread pool")?;
            let traces = pool.install(|| net.infer_batch(&vectors))?;
            let mut out: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| format!("create {}", path.display()))?)),
                None => Box::new(BufWriter::new(io::stdout().lock())),
            };
            for (i, (bus, trace)) in vectors.iter().zip(&traces).enumerate() {
                let rec = GoldenRecord { label: format!("{}#{}", input.display(), i), bus, trace };
                writeln!(out, "{}", to_json_line(&rec)?)?;
            }
            out.flush()?;
            info!("evaluated {} vectors from {}", traces.len(), input.display());
        }
        Cmd::Pack { input, output } => {
            let n = pack_file(&input, &output)?;
            println!("Done! Packed {} lines into {}", n, output.display());
        }
    }
    Ok(())
}
