use clap::Parser;
use std::time::Duration;

use dungeon_generator::ascii;
use dungeon_generator::automata::CellularAutomata;
use dungeon_generator::bsp::BspDungeon;
use dungeon_generator::grid::TileGrid;
use dungeon_generator::method::{
    DelayPacer, GenerationContext, GenerationMethod, NoPacer, StepPacer,
};
use dungeon_generator::noise_biomes::NoiseBiomes;
use dungeon_generator::random::RandomService;
use dungeon_generator::registry::TileRegistry;
use dungeon_generator::scatter::RoomScatter;

#[derive(Parser, Debug)]
#[command(name = "dungeon_generator")]
#[command(about = "Generate tile-grid dungeons and terrain with interchangeable methods")]
struct Args {
    /// Width of the grid in cells
    #[arg(short = 'W', long, default_value = "48")]
    width: i32,

    /// Length of the grid in cells
    #[arg(short = 'L', long, default_value = "24")]
    length: i32,

    /// Random seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Generation method: scatter, bsp, automata or noise
    #[arg(short, long, default_value = "bsp")]
    method: String,

    /// Initial grass density in percent (automata method)
    #[arg(long, default_value = "55")]
    density: f64,

    /// Smoothing iterations (automata method)
    #[arg(long, default_value = "3")]
    iterations: u32,

    /// Outline partition bounds with rock tiles (bsp method)
    #[arg(long)]
    show_partitions: bool,

    /// Delay between generation phases, in milliseconds
    #[arg(long, default_value = "0")]
    step_delay: u64,

    /// Print the effective method configuration as JSON
    #[arg(long)]
    dump_config: bool,

    /// Print the tile glyph legend under the map
    #[arg(long)]
    legend: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);

    let (method, config): (Box<dyn GenerationMethod>, serde_json::Value) =
        match args.method.as_str() {
            "scatter" => {
                let method = RoomScatter::default();
                let config = serde_json::to_value(&method).expect("config serializes");
                (Box::new(method), config)
            }
            "bsp" => {
                let method = BspDungeon {
                    show_debug: args.show_partitions,
                    ..BspDungeon::default()
                };
                let config = serde_json::to_value(&method).expect("config serializes");
                (Box::new(method), config)
            }
            "automata" => {
                let method = CellularAutomata {
                    density: args.density,
                    iterations: args.iterations,
                };
                let config = serde_json::to_value(&method).expect("config serializes");
                (Box::new(method), config)
            }
            "noise" => {
                let method = NoiseBiomes::default();
                let config = serde_json::to_value(&method).expect("config serializes");
                (Box::new(method), config)
            }
            other => {
                eprintln!("unknown method '{other}' (expected scatter, bsp, automata or noise)");
                std::process::exit(2);
            }
        };

    println!("Method: {}  Seed: {seed}", method.name());
    if args.dump_config {
        println!(
            "{}",
            serde_json::to_string_pretty(&config).expect("config serializes")
        );
    }

    let registry = TileRegistry::standard();
    let mut grid = TileGrid::new(args.width, args.length);
    let mut random = RandomService::new(seed);
    let pacer: Box<dyn StepPacer> = if args.step_delay > 0 {
        Box::new(DelayPacer {
            delay: Duration::from_millis(args.step_delay),
        })
    } else {
        Box::new(NoPacer)
    };

    let result = {
        let mut ctx = GenerationContext::new(&mut grid, &mut random, &registry)
            .with_pacer(pacer.as_ref());
        method.generate(&mut ctx)
    };
    if let Err(err) = result {
        eprintln!("generation failed: {err}");
        std::process::exit(1);
    }

    print!("{}", ascii::render_grid(&grid, &registry));
    if args.legend {
        println!();
        print!("{}", ascii::render_legend(&registry));
    }
}
