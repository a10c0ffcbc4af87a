use std::{
    env,
    io::{self, BufRead, Write},
    num::NonZeroUsize,
};

use clap::{App, Arg, ArgMatches};
use enumflags2::BitFlags;
use log::{debug, LevelFilter};
use once_cell::sync::Lazy;
use rand::distributions::Distribution;
use regex::{Captures, Regex};

use battlespace::{
    board::Coordinate, ErrorKind, GameId, GameRegistry, GameRules, ShotOutcome, VesselId,
    VesselType,
};

/// Number of random cells tried before giving up on a random placement.
const RANDOM_PLACEMENT_ATTEMPTS: usize = 256;

fn main() -> io::Result<()> {
    init_logging();

    let matches = App::new("Battlespace")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Command line driver for 3-D battleship games.")
        .arg(
            Arg::with_name("max_players")
                .short("m")
                .long("max-players")
                .value_name("N")
                .help("maximum number of players per game, including the creator")
                .takes_value(true)
                .validator(|v| match v.parse::<usize>() {
                    Ok(n) if n > 0 => Ok(()),
                    _ => Err(format!("expected a positive number, got {:?}", v)),
                }),
        )
        .arg(
            Arg::with_name("vessel_types")
                .short("t")
                .long("vessel-types")
                .value_name("TYPES")
                .help("comma separated list of vessel types players may place")
                .takes_value(true)
                .validator(|v| parse_vessel_types(&v).map(|_| ())),
        )
        .get_matches();

    let registry = GameRegistry::with_rules(rules_from_args(&matches));
    debug!("starting with rules {:?}", registry.rules());

    let stdin = io::stdin();
    let mut input = InputReader::new(stdin.lock());
    let mut rng = rand::thread_rng();

    println!("Battlespace. Type help or ? for commands.");
    while let Some(cmd) = input.read_command(">")? {
        match cmd {
            Command::Quit => break,
            Command::Help => print_help(),
            cmd => run(&registry, &mut rng, cmd),
        }
    }
    Ok(())
}

/// Install the logger. Defaults to warnings and above unless `RUST_LOG` says otherwise.
fn init_logging() {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(LevelFilter::Warn);
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

/// Build the [`GameRules`] from the command line. Values were already checked by the
/// argument validators.
fn rules_from_args(matches: &ArgMatches) -> GameRules {
    let mut rules = GameRules::new();
    if let Some(max) = matches.value_of("max_players") {
        rules = rules.with_max_players(max.parse().ok().and_then(NonZeroUsize::new));
    }
    if let Some(types) = matches.value_of("vessel_types") {
        if let Ok(types) = parse_vessel_types(types) {
            rules = rules.with_vessel_types(types);
        }
    }
    rules
}

/// Parse a comma separated list of vessel types.
fn parse_vessel_types(list: &str) -> Result<BitFlags<VesselType>, String> {
    let mut types = BitFlags::empty();
    for name in list.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        types.insert(name.parse::<VesselType>().map_err(|err| err.to_string())?);
    }
    if types.is_empty() {
        Err("at least one vessel type is required".to_owned())
    } else {
        Ok(types)
    }
}

/// Where to put a new vessel.
enum Target {
    At(Coordinate),
    Random,
}

/// A parsed line of input.
enum Command {
    Create {
        creator: String,
        limits: [i64; 6],
    },
    Join {
        game: GameId,
        player: String,
    },
    Place {
        game: GameId,
        player: String,
        vessel_type: String,
        target: Target,
    },
    Shoot {
        game: GameId,
        shooter: String,
        vessel: VesselId,
        coord: Coordinate,
    },
    Status {
        game: GameId,
        player: String,
    },
    Show(GameId),
    Games,
    Help,
    Quit,
}

/// Matchers for commands with args.
static CREATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?xi)(?:create|new)\s+
        (?P<player>\S+)\s+
        (?P<limits>-?[0-9]+(?:\s+-?[0-9]+){5})$",
    )
    .unwrap()
});
static JOIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?xi)join\s+
        (?P<game>[0-9]+)\s+
        (?P<player>\S+)$",
    )
    .unwrap()
});
static PLACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?xi)(?:place|add|put)\s+
        (?P<game>[0-9]+)\s+
        (?P<player>\S+)\s+
        (?P<vessel>\w+)\s+
        (?:(?:at|on|to)\s+)?
        (?:(?P<random>random|rand)|
        (?P<x>-?[0-9]+)\s*,\s*(?P<y>-?[0-9]+)\s*,\s*(?P<z>-?[0-9]+))$",
    )
    .unwrap()
});
static SHOOT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?xi)(?:shoot|fire)\s+
        (?P<game>[0-9]+)\s+
        (?P<player>\S+)\s+
        \#?(?P<vessel>[0-9]+)\s+
        (?:at\s+)?
        (?P<x>-?[0-9]+)\s*,\s*(?P<y>-?[0-9]+)\s*,\s*(?P<z>-?[0-9]+)$",
    )
    .unwrap()
});
static STATUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?xi)status\s+
        (?P<game>[0-9]+)\s+
        (?P<player>\S+)$",
    )
    .unwrap()
});
static SHOW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)(?:show|get)\s+(?P<game>[0-9]+)$").unwrap());

/// Parse a single line of input into a [`Command`].
fn parse_command(line: &str) -> Result<Command, String> {
    match line.to_ascii_lowercase().as_str() {
        "?" | "help" | "h" => return Ok(Command::Help),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        "games" | "list" => return Ok(Command::Games),
        _ => {}
    }
    if let Some(captures) = CREATE.captures(line) {
        let mut limits = [0; 6];
        for (slot, value) in limits.iter_mut().zip(captures["limits"].split_whitespace()) {
            *slot = value
                .parse()
                .map_err(|_| format!("limit {} is out of range", value))?;
        }
        Ok(Command::Create {
            creator: captures["player"].to_owned(),
            limits,
        })
    } else if let Some(captures) = JOIN.captures(line) {
        Ok(Command::Join {
            game: game_id(&captures)?,
            player: captures["player"].to_owned(),
        })
    } else if let Some(captures) = PLACE.captures(line) {
        let target = if captures.name("random").is_some() {
            Target::Random
        } else {
            Target::At(coordinate(&captures)?)
        };
        Ok(Command::Place {
            game: game_id(&captures)?,
            player: captures["player"].to_owned(),
            vessel_type: captures["vessel"].to_owned(),
            target,
        })
    } else if let Some(captures) = SHOOT.captures(line) {
        Ok(Command::Shoot {
            game: game_id(&captures)?,
            shooter: captures["player"].to_owned(),
            vessel: number::<u32>(&captures, "vessel").map(VesselId::new)?,
            coord: coordinate(&captures)?,
        })
    } else if let Some(captures) = STATUS.captures(line) {
        Ok(Command::Status {
            game: game_id(&captures)?,
            player: captures["player"].to_owned(),
        })
    } else if let Some(captures) = SHOW.captures(line) {
        Ok(Command::Show(game_id(&captures)?))
    } else {
        Err(format!("Invalid command \"{}\". Use '?' for help", line))
    }
}

/// Parse the named capture as a number.
fn number<T: std::str::FromStr>(captures: &Captures, name: &str) -> Result<T, String> {
    let text = captures.name(name).map_or("", |m| m.as_str());
    text.parse()
        .map_err(|_| format!("invalid {}: {} is out of range", name, text))
}

fn game_id(captures: &Captures) -> Result<GameId, String> {
    number::<u64>(captures, "game").map(GameId::new)
}

fn coordinate(captures: &Captures) -> Result<Coordinate, String> {
    Ok(Coordinate::new(
        number(captures, "x")?,
        number(captures, "y")?,
        number(captures, "z")?,
    ))
}

/// Execute a command against the registry and print the result.
fn run(registry: &GameRegistry, rng: &mut impl rand::Rng, cmd: Command) {
    let result = match cmd {
        Command::Create { creator, limits } => {
            let [min_x, max_x, min_y, max_y, min_z, max_z] = limits;
            registry
                .create_game_with_limits(&creator[..], min_x, max_x, min_y, max_y, min_z, max_z)
                .map(|id| format!("created game {}", id))
        }
        Command::Join { game, player } => registry
            .join(game, &player[..])
            .map(|()| format!("{} joined game {}", player, game)),
        Command::Place {
            game,
            player,
            vessel_type,
            target,
        } => place(registry, rng, game, &player, &vessel_type, target),
        Command::Shoot {
            game,
            shooter,
            vessel,
            coord,
        } => registry
            .shoot_at(game, &shooter, vessel, coord.x, coord.y, coord.z)
            .map(describe_shot),
        Command::Status { game, player } => registry
            .status_for(game, &player)
            .map(|status| status.to_string()),
        Command::Show(game) => registry.snapshot(game).map(|snapshot| {
            let mut out = format!(
                "game {}: {}\nbounds: {}",
                snapshot.id, snapshot.phase, snapshot.bounds
            );
            if let Some(winner) = &snapshot.winner {
                out += &format!("\nwinner: {}", winner);
            }
            for player in &snapshot.players {
                out += &format!(
                    "\n  {}{} ({} of {} afloat)",
                    player.name(),
                    if player.is_creator() { " (creator)" } else { "" },
                    player.afloat(),
                    player.vessels().len()
                );
                for vessel in player.vessels() {
                    out += &format!(
                        "\n    #{:<3} {:<9} at {} {}",
                        vessel.id(),
                        vessel.vessel_type(),
                        vessel.coord(),
                        if vessel.is_hit() { "sunk" } else { "afloat" }
                    );
                }
            }
            out
        }),
        Command::Games => {
            let ids = registry.game_ids();
            Ok(if ids.is_empty() {
                "no games".to_owned()
            } else {
                ids.iter()
                    .map(GameId::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
        }
        Command::Help | Command::Quit => Ok(String::new()),
    };
    match result {
        Ok(message) => println!("{}", message),
        Err(err) => println!("error ({}): {}", err.kind(), err),
    }
}

/// Place a vessel, picking a random free cell if asked to.
fn place(
    registry: &GameRegistry,
    rng: &mut impl rand::Rng,
    game: GameId,
    player: &str,
    vessel_type: &str,
    target: Target,
) -> battlespace::Result<String> {
    let describe = |id: VesselId, coord: Coordinate| {
        format!("placed {} #{} for {} at {}", vessel_type, id, player, coord)
    };
    match target {
        Target::At(coord) => registry
            .add_vessel(game, player, vessel_type, coord.x, coord.y, coord.z)
            .map(|id| describe(id, coord)),
        Target::Random => {
            let bounds = registry.snapshot(game)?.bounds;
            let mut attempt = 0;
            loop {
                let coord = bounds.sample(rng);
                match registry.add_vessel(game, player, vessel_type, coord.x, coord.y, coord.z) {
                    Ok(id) => return Ok(describe(id, coord)),
                    Err(err)
                        if err.kind() == ErrorKind::CellOccupied
                            && attempt < RANDOM_PLACEMENT_ATTEMPTS =>
                    {
                        attempt += 1;
                    }
                    Err(err) => return Err(err),
                }
            }
        }
    }
}

fn describe_shot(outcome: ShotOutcome) -> String {
    match outcome {
        ShotOutcome::Miss => "miss".to_owned(),
        ShotOutcome::Sunk(id) => format!("hit: vessel #{} sunk", id),
        ShotOutcome::AlreadySunk(id) => format!("hit: vessel #{} was already sunk", id),
        ShotOutcome::Victory(id) => format!("hit: vessel #{} sunk, game over", id),
    }
}

fn print_help() {
    println!(
        "Available Commands:
    create <player> <min_x> <max_x> <min_y> <max_y> <min_z> <max_z>
                                        create a game; the creator joins it.
    join <game> <player>                join a game.
    place <game> <player> <type> <x>,<y>,<z>
                                        place a vessel at the given cell.
    place <game> <player> <type> random place a vessel at a random free cell.
    shoot <game> <player> <vessel> <x>,<y>,<z>
                                        fire at the given vessel on the given cell.
    status <game> <player>              show the game status for a player.
    show <game>                         show the whole game.
    games                               list game ids.
    quit                                exit.

Available Vessel Types:"
    );
    for &kind in VesselType::ALL {
        println!("    \"{}\" (\"{}\")", kind, kind.abbrev());
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly reads lines until one parses as a command. Returns `None` at end of
    /// input.
    fn read_command(&mut self, prompt: &str) -> io::Result<Option<Command>> {
        loop {
            if !self.read_input_inner(prompt)? {
                return Ok(None);
            }
            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }
            match parse_command(line) {
                Ok(cmd) => return Ok(Some(cmd)),
                Err(msg) => println!("{}", msg),
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line. Returns
    /// false at end of input.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<bool> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            return Ok(false);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create() {
        match parse_command("create alice 0 10 -1 1 0 0") {
            Ok(Command::Create { creator, limits }) => {
                assert_eq!(creator, "alice");
                assert_eq!(limits, [0, 10, -1, 1, 0, 0]);
            }
            _ => panic!("expected create"),
        }
        assert!(parse_command("create alice 0 10 0 10 0").is_err());
    }

    #[test]
    fn parses_place_and_shoot() {
        match parse_command("place 1 Bob CV at 1, -2 ,3") {
            Ok(Command::Place {
                game,
                player,
                vessel_type,
                target: Target::At(coord),
            }) => {
                assert_eq!(game, GameId::new(1));
                assert_eq!(player, "Bob");
                assert_eq!(vessel_type, "CV");
                assert_eq!(coord, Coordinate::new(1, -2, 3));
            }
            _ => panic!("expected place"),
        }
        assert!(matches!(
            parse_command("add 2 bob scout random"),
            Ok(Command::Place {
                target: Target::Random,
                ..
            })
        ));
        match parse_command("fire 3 alice #7 at 2,2,2") {
            Ok(Command::Shoot {
                game,
                shooter,
                vessel,
                coord,
            }) => {
                assert_eq!(game, GameId::new(3));
                assert_eq!(shooter, "alice");
                assert_eq!(vessel, VesselId::new(7));
                assert_eq!(coord, Coordinate::new(2, 2, 2));
            }
            _ => panic!("expected shoot"),
        }
    }

    #[test]
    fn rejects_garbage_and_overflow() {
        assert!(parse_command("dance").is_err());
        assert!(parse_command("join 99999999999999999999999 bob").is_err());
        assert!(matches!(parse_command("?"), Ok(Command::Help)));
        assert!(matches!(parse_command("QUIT"), Ok(Command::Quit)));
        assert!(matches!(parse_command("show 4"), Ok(Command::Show(_))));
    }

    #[test]
    fn vessel_type_lists() {
        let types = parse_vessel_types("scout, cv").unwrap();
        assert!(types.contains(VesselType::Scout));
        assert!(types.contains(VesselType::Carrier));
        assert!(!types.contains(VesselType::Cruiser));
        assert!(parse_vessel_types(" , ").is_err());
        assert!(parse_vessel_types("scout,rowboat").is_err());
    }

    #[test]
    fn random_placement_fills_small_games() {
        let registry = GameRegistry::new();
        let game = registry.create_game_with_limits("A", 0, 1, 0, 0, 0, 0).unwrap();
        let mut rng = rand::thread_rng();
        for _ in 0..2 {
            place(&registry, &mut rng, game, "A", "scout", Target::Random).unwrap();
        }
        let err = place(&registry, &mut rng, game, "A", "scout", Target::Random).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CellOccupied);
    }
}
