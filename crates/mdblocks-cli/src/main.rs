use anyhow::{Context, Result};
use mdblocks_config::Config;
use mdblocks_engine::{
    editing::{Document, EscapedTextRenderer},
    io,
};
use std::{
    env,
    path::{Path, PathBuf},
    process,
};

const COMMANDS: &str = "\
Commands:
  scan <file>                 list the blocks of a file
  diff <old-file> <new-file>  commands turning the old file's blocks into the new one's
  outline <file>              title and headings
  chunks <file>               progressive rendering chunks
  snapshot <file>             write the block snapshot as JSON
  render <file>               render every block and print the full content";

const PREVIEW_CHARS: usize = 48;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} <command> <args>");
    eprintln!("{COMMANDS}");
    process::exit(1);
}

fn init_logging(config: &Config) {
    let level = config
        .log_level()
        .parse::<log::LevelFilter>()
        .unwrap_or(log::LevelFilter::Warn);

    let mut builder = env_logger::Builder::from_default_env();
    if env::var_os("RUST_LOG").is_none() {
        builder.filter_level(level);
    }
    builder.init();
}

fn load(path: &Path) -> Result<Document> {
    io::load_document(path).with_context(|| format!("reading {}", path.display()))
}

/// First line of a block, shortened for one-line listings.
fn preview(content: &str) -> String {
    let first = content.lines().next().unwrap_or("");
    let mut preview: String = first.chars().take(PREVIEW_CHARS).collect();
    if first.chars().count() > PREVIEW_CHARS || content.contains('\n') {
        preview.push('…');
    }
    preview
}

fn scan(path: &Path) -> Result<()> {
    let doc = load(path)?;
    for (index, block) in doc.blocks().iter().enumerate() {
        println!(
            "{index:>4}  {:<12} {:>5}+{:<4} {}  {}",
            format!("{:?}", block.kind),
            block.start_line,
            block.line_count,
            block.fingerprint,
            preview(&block.content)
        );
    }
    Ok(())
}

fn diff(old: &Path, new: &Path) -> Result<()> {
    let mut doc = load(old)?;
    let text = io::read_document(new).with_context(|| format!("reading {}", new.display()))?;
    let outcome = doc.update(&text);

    println!(
        "kept={} inserted={} removed={}",
        outcome.stats.kept, outcome.stats.inserted, outcome.stats.removed
    );
    println!("{}", serde_json::to_string_pretty(&outcome.commands)?);
    Ok(())
}

fn outline(path: &Path) -> Result<()> {
    let doc = load(path)?;
    match doc.title() {
        Some(title) => println!("Title: {title}"),
        None => println!("Title: (none)"),
    }
    for heading in doc.headings() {
        let indent = "  ".repeat(usize::from(heading.level.saturating_sub(1)));
        println!(
            "{indent}- {} (#{}) line {}",
            heading.text, heading.slug, heading.line
        );
    }
    Ok(())
}

fn chunks(path: &Path, config: &Config) -> Result<()> {
    let doc = load(path)?;
    let mut first_block = 0;
    for (i, chunk) in doc
        .chunks(config.initial_chunk_lines, config.max_chunk_lines)
        .iter()
        .enumerate()
    {
        let (Some(first), Some(last)) = (chunk.first(), chunk.last()) else {
            continue;
        };
        println!(
            "chunk {i}: blocks {}..{} lines {}-{}",
            first_block,
            first_block + chunk.len(),
            first.start_line,
            last.end_line()
        );
        first_block += chunk.len();
    }
    Ok(())
}

fn snapshot(path: &Path, config: &Config) -> Result<()> {
    let doc = load(path)?;
    let json = doc.to_json()?;

    match &config.snapshot_dir {
        Some(dir) => {
            let stem = path
                .file_stem()
                .with_context(|| format!("no file name in {}", path.display()))?;
            let mut name = stem.to_os_string();
            name.push(".blocks.json");
            let target: PathBuf = dir.join(name);

            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
            io::write_document(&target, &json)
                .with_context(|| format!("writing {}", target.display()))?;
            log::info!("wrote snapshot of {} blocks to {}", doc.len(), target.display());
            println!("{}", target.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn render(path: &Path) -> Result<()> {
    let text = io::read_document(path).with_context(|| format!("reading {}", path.display()))?;
    let mut doc = Document::new();
    doc.update_with(&text, &EscapedTextRenderer);
    println!("{}", doc.full_content());
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("mdblocks-cli");

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    init_logging(&config);
    log::debug!("config: {config:?}");

    let paths: Vec<&Path> = args.iter().skip(2).map(Path::new).collect();
    match (args.get(1).map(String::as_str), paths.as_slice()) {
        (Some("scan"), [file]) => scan(file),
        (Some("diff"), [old, new]) => diff(old, new),
        (Some("outline"), [file]) => outline(file),
        (Some("chunks"), [file]) => chunks(file, &config),
        (Some("snapshot"), [file]) => snapshot(file, &config),
        (Some("render"), [file]) => render(file),
        _ => usage(program),
    }
}
