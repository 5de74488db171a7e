use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use broughlike::{
    random_seed, seed_from_str, BoardRenderer, DungeonGenerator, DungeonLayout, GenerationConfig,
    TemplateLibrary,
};

fn main() -> Result<()> {
    let common_args = [
        Arg::new("seed")
            .long("seed")
            .short('s')
            .help("Seed for the run; a random one is drawn when omitted"),
        Arg::new("config")
            .long("config")
            .short('c')
            .value_parser(clap::value_parser!(PathBuf))
            .help("JSON file with generation settings"),
        Arg::new("levels")
            .long("levels")
            .short('l')
            .value_parser(clap::value_parser!(usize))
            .help("Number of floors to generate"),
        Arg::new("monsters")
            .long("monsters")
            .value_parser(clap::value_parser!(PathBuf))
            .help("Directory of monster templates (*.json)"),
        Arg::new("verbose")
            .long("verbose")
            .short('v')
            .action(ArgAction::SetTrue)
            .help("Report how many layouts each floor needed"),
    ];

    let matches = Command::new("broughlike")
        .about("Dungeon floor generator for a small grid crawler")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("generate")
                .about("Generate a dungeon and print every floor")
                .args(common_args.clone())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the whole dungeon as JSON"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Generate a dungeon and verify its structural guarantees")
                .args(common_args),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("generate", sub)) => run_generate(sub),
        Some(("check", sub)) => run_check(sub),
        _ => Ok(()),
    }
}

fn load_config(matches: &ArgMatches) -> Result<GenerationConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => GenerationConfig::load(path)?,
        None => GenerationConfig::default(),
    };
    if let Some(levels) = matches.get_one::<usize>("levels") {
        config.level_count = *levels;
    }
    Ok(config)
}

fn build(matches: &ArgMatches) -> Result<(GenerationConfig, DungeonLayout)> {
    let config = load_config(matches)?;
    let seed = match matches.get_one::<String>("seed") {
        Some(text) => seed_from_str(text),
        None => random_seed(),
    };
    let library = match matches.get_one::<PathBuf>("monsters") {
        Some(dir) => TemplateLibrary::load_dir(dir)?,
        None => TemplateLibrary::builtin()?,
    };

    let generator = DungeonGenerator::new(config.clone())
        .context("Refusing to generate with this configuration")?
        .verbose(matches.get_flag("verbose"));
    let dungeon = generator
        .generate_dungeon(seed, &library)
        .with_context(|| format!("Failed to generate dungeon for seed {}", seed))?;

    Ok((config, dungeon))
}

fn run_generate(matches: &ArgMatches) -> Result<()> {
    let (_, dungeon) = build(matches)?;

    if matches.get_flag("json") {
        let json = serde_json::to_string_pretty(&dungeon)?;
        println!("{}", json);
        return Ok(());
    }

    println!("Seed: ({})", dungeon.seed);
    println!();
    for line in BoardRenderer::new(true).render_dungeon(&dungeon) {
        println!("{}", line);
    }
    Ok(())
}

fn run_check(matches: &ArgMatches) -> Result<()> {
    let (config, dungeon) = build(matches)?;
    let problems = dungeon.check_invariants(&config);

    println!("Seed: ({})", dungeon.seed);
    for (i, level) in dungeon.levels.iter().enumerate() {
        println!(
            "Level {}: {} open tiles, {} resources, {} monsters, {} attempts",
            i + 1,
            level.board.open_count(),
            level.board.resource_positions().len(),
            dungeon.spawns(i).len(),
            level.attempts
        );
    }

    if problems.is_empty() {
        println!("All checks passed");
        return Ok(());
    }
    for problem in &problems {
        eprintln!("{}", problem);
    }
    anyhow::bail!("{} check(s) failed", problems.len())
}
