use asm65::{debug_map, Assembler};
use color_print::cprintln;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.asm")]
    input: String,

    /// Output ROM image
    #[clap(short, long, default_value = "main.bin")]
    output: String,

    /// Write a source-to-byte debug map
    #[clap(short = 'g', long)]
    debug: Option<String>,

    /// Dump the listing to stdout
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    println!("6502 Assembler");

    println!("1. Pass 1: Read Files and Collect Labels");
    println!("  < {}", &args.input);
    let program = match Assembler::new().pass1(&args.input) {
        Ok(program) => program,
        Err(err) => {
            err.print_diag();
            std::process::exit(1);
        }
    };
    println!(
        "  {} labels, {} nodes",
        program.labels().count(),
        program.nodes().len()
    );

    println!("2. Pass 2: Resolve Labels & Generate Binary");
    let image = match program.pass2(args.debug.is_some() || args.dump) {
        Ok(image) => image,
        Err(err) => {
            err.print_diag();
            std::process::exit(1);
        }
    };

    println!("  > {} ({} bytes)", &args.output, image.rom.len());
    if let Err(err) = std::fs::write(&args.output, &image.rom) {
        cprintln!("<r,s>Failed to write File</>: {}: {}", &args.output, err);
        std::process::exit(1);
    }

    if let Some(path) = &args.debug {
        println!("  > {}", path);
        if let Err(err) = std::fs::write(path, debug_map(&image.records)) {
            cprintln!("<r,s>Failed to write File</>: {}: {}", path, err);
            std::process::exit(1);
        }
    }

    if args.dump {
        println!("-----+------------------+-----------------------------------------------");
        for record in &image.records {
            println!("{}", record.cformat());
        }
        println!("-----+------------------+-----------------------------------------------");
    }
}
