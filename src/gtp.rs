//! Go Text Protocol (GTP) front end.
//!
//! Lets GUI and match tools (GoGui, Sabaki, tournament scripts) drive the
//! engine. Besides the standard GTP core commands it supports a few NoGo
//! extensions for inspecting and tuning the search.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`, `quit`
//! - `boardsize <size>` - Resize and clear the board
//! - `clear_board` - Reset the board to empty
//! - `showboard` - Print the board
//! - `play <color> <vertex>` - Play a move (passing is not a NoGo move)
//! - `genmove <color>` - Search, play and print a move, or `resign`
//! - `legal_moves <color>` - List legal moves
//! - `policy <random|pattern>` - Select the rollout policy
//! - `selection <rr|ucb>` - Select the budget allocator
//! - `policy_moves` - Print the rollout policy's distribution for the side to move
//! - `move_stats <color>` - Search and print each candidate's win rate

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::board::{Board, Color, Move};
use crate::config::{AllocatorKind, EngineConfig, PolicyKind};
use crate::coord::{format_move, parse_move};
use crate::search::Engine;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "genmove",
    "known_command",
    "legal_moves",
    "list_commands",
    "move_stats",
    "name",
    "play",
    "policy",
    "policy_moves",
    "protocol_version",
    "quit",
    "selection",
    "showboard",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    /// Current game position
    board: Board,
    /// Move selection engine
    engine: Engine,
}

impl GtpEngine {
    /// Create a GTP engine playing on `board`.
    pub fn new(board: Board, engine: Engine) -> Self {
        Self { board, engine }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run the GTP command loop on stdin/stdout.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the GTP command loop on arbitrary streams.
    pub fn run_with<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        info!(size = self.board.size(), "GTP session started");
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse optional command ID
            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];
            debug!(%command, ?args, "GTP command");

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    fn parse_color(arg: &str) -> Option<Color> {
        match arg.to_lowercase().as_str() {
            "b" | "black" => Some(Color::Black),
            "w" | "white" => Some(Color::White),
            _ => None,
        }
    }

    fn vertex(&self, mv: Move) -> String {
        format_move(mv, self.board.size()).unwrap_or_else(|e| e.to_string())
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "nogo-mc".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let Ok(size) = arg.parse::<usize>() else {
                    return (false, "invalid size".to_string());
                };
                match Board::new(size) {
                    Ok(board) => {
                        self.board = board;
                        (true, String::new())
                    }
                    Err(e) => (false, format!("unacceptable size: {e}")),
                }
            }

            "clear_board" => match Board::new(self.board.size()) {
                Ok(board) => {
                    self.board = board;
                    (true, String::new())
                }
                Err(e) => (false, e.to_string()),
            },

            "showboard" => (true, format!("\n{}", self.board)),

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let Some(color) = Self::parse_color(args[0]) else {
                    return (false, format!("illegal move: \"{}\" wrong color", args[0]));
                };
                let mv = match parse_move(args[1], self.board.size()) {
                    Ok(Move::Pass) => {
                        return (false, format!("illegal move: \"{}\" pass", args[1]));
                    }
                    Ok(mv) => mv,
                    Err(e) => return (false, format!("illegal move: \"{}\" {e}", args[1])),
                };
                match self.board.play(mv, color) {
                    Ok(()) => (true, String::new()),
                    Err(e) => (
                        false,
                        format!("illegal move: \"{} {}\" {e}", args[0], args[1].to_lowercase()),
                    ),
                }
            }

            "genmove" => {
                let Some(color) = args.first().and_then(|a| Self::parse_color(a)) else {
                    return (false, "missing or invalid color".to_string());
                };
                match self.engine.get_move(&self.board, color) {
                    None => (true, "resign".to_string()),
                    Some(pt) => match self.board.play(Move::Play(pt), color) {
                        Ok(()) => (true, self.vertex(Move::Play(pt))),
                        Err(e) => (false, format!("engine produced an illegal move: {e}")),
                    },
                }
            }

            "legal_moves" => {
                let Some(color) = args.first().and_then(|a| Self::parse_color(a)) else {
                    return (false, "missing or invalid color".to_string());
                };
                let moves: Vec<String> = self
                    .board
                    .legal_moves(color)
                    .into_iter()
                    .map(|pt| self.vertex(Move::Play(pt)))
                    .collect();
                (true, moves.join(" "))
            }

            "policy" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<PolicyKind>() {
                    Ok(kind) => self.reconfigure(|c| c.with_policy(kind)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "selection" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<AllocatorKind>() {
                    Ok(kind) => self.reconfigure(|c| c.with_allocator(kind)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "policy_moves" => {
                let color = self.board.current_player();
                let mut probs: Vec<(String, f64)> = self
                    .engine
                    .policy_moves(&self.board, color)
                    .into_iter()
                    .map(|(pt, p)| (self.vertex(Move::Play(pt)), p))
                    .collect();
                // Column first, then row.
                probs.sort_by_key(|(v, _)| (v.as_bytes()[0], v[1..].parse::<usize>().unwrap_or(0)));
                let moves: Vec<String> = probs.iter().map(|(v, _)| v.clone()).collect();
                let values: Vec<String> = probs.iter().map(|(_, p)| format!("{p:.3}")).collect();
                if moves.is_empty() {
                    (true, String::new())
                } else {
                    (true, format!("{} {}", moves.join(" "), values.join(" ")))
                }
            }

            "move_stats" => {
                let Some(color) = args.first().and_then(|a| Self::parse_color(a)) else {
                    return (false, "missing or invalid color".to_string());
                };
                let Some(result) = self.engine.search(&self.board, color) else {
                    return (true, String::new());
                };
                let lines: Vec<String> = result
                    .win_rates()
                    .into_iter()
                    .map(|(pt, rate)| format!("{} {rate:.3}", self.vertex(Move::Play(pt))))
                    .collect();
                (true, lines.join("\n"))
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn reconfigure(&mut self, f: impl FnOnce(EngineConfig) -> EngineConfig) -> (bool, String) {
        let config = f(self.engine.config().clone());
        match self.engine.set_config(config) {
            Ok(()) => (true, String::new()),
            Err(e) => (false, e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::constants::DEFAULT_BOARD_SIZE;
    use crate::patterns::PatternWeights;

    fn engine() -> GtpEngine {
        let config = EngineConfig::default().with_simulations(5).with_seed(9);
        let engine = Engine::new(config, Arc::new(PatternWeights::default())).unwrap();
        GtpEngine::new(Board::new(DEFAULT_BOARD_SIZE).unwrap(), engine)
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = GtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = GtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = engine();
        let (success, response) = engine.execute("name", &[]);
        assert!(success);
        assert_eq!(response, "nogo-mc");
    }

    #[test]
    fn test_protocol_version() {
        let mut engine = engine();
        let (success, response) = engine.execute("protocol_version", &[]);
        assert!(success);
        assert_eq!(response, "2");
    }

    #[test]
    fn test_known_command() {
        let mut engine = engine();

        let (success, response) = engine.execute("known_command", &["genmove"]);
        assert!(success);
        assert_eq!(response, "true");

        let (success, response) = engine.execute("known_command", &["komi"]);
        assert!(success);
        assert_eq!(response, "false");
    }

    #[test]
    fn test_boardsize() {
        let mut engine = engine();

        let (success, _) = engine.execute("boardsize", &["5"]);
        assert!(success);
        assert_eq!(engine.board().size(), 5);

        let (success, _) = engine.execute("boardsize", &["30"]);
        assert!(!success);
        assert_eq!(engine.board().size(), 5);
    }

    #[test]
    fn test_play_and_clear() {
        let mut engine = engine();

        let (success, _) = engine.execute("play", &["b", "D4"]);
        assert!(success);
        assert_eq!(engine.board().empty_points().len(), 48);
        assert_eq!(engine.board().current_player(), Color::White);

        let (success, response) = engine.execute("play", &["w", "d4"]);
        assert!(!success);
        assert!(response.contains("occupied"), "{response}");

        let (success, _) = engine.execute("clear_board", &[]);
        assert!(success);
        assert_eq!(engine.board().empty_points().len(), 49);
    }

    #[test]
    fn test_play_rejects_pass_and_bad_input() {
        let mut engine = engine();
        assert!(!engine.execute("play", &["b", "pass"]).0);
        assert!(!engine.execute("play", &["red", "a1"]).0);
        assert!(!engine.execute("play", &["b", "z9"]).0);
        assert!(!engine.execute("play", &["b"]).0);
    }

    #[test]
    fn test_genmove_plays_legal_move() {
        let mut engine = engine();
        engine.execute("boardsize", &["5"]);
        let (success, response) = engine.execute("genmove", &["b"]);
        assert!(success);
        let mv = parse_move(&response, 5).unwrap();
        let Move::Play(pt) = mv else {
            panic!("expected a point, got {response}");
        };
        assert_eq!(engine.board().get(pt), Color::Black);
        assert_eq!(engine.board().current_player(), Color::White);
    }

    #[test]
    fn test_policy_and_selection() {
        let mut engine = engine();
        assert!(engine.execute("policy", &["pattern"]).0);
        assert!(engine.execute("selection", &["ucb"]).0);
        assert!(!engine.execute("policy", &["minimax"]).0);
        assert!(!engine.execute("selection", &[]).0);
    }

    #[test]
    fn test_policy_moves_uniform() {
        let mut engine = engine();
        engine.execute("boardsize", &["2"]);
        let (success, response) = engine.execute("policy_moves", &[]);
        assert!(success);
        assert_eq!(response, "A1 A2 B1 B2 0.250 0.250 0.250 0.250");
    }

    #[test]
    fn test_legal_moves_and_stats() {
        let mut engine = engine();
        engine.execute("boardsize", &["3"]);
        let (success, response) = engine.execute("legal_moves", &["w"]);
        assert!(success);
        assert_eq!(response.split_whitespace().count(), 9);

        let (success, response) = engine.execute("move_stats", &["b"]);
        assert!(success);
        assert_eq!(response.lines().count(), 9);
    }

    #[test]
    fn test_run_with_session() {
        let mut engine = engine();
        let input = "1 boardsize 5\n# comment\n2 play b c3\n3 unknown\nquit\nname\n";
        let mut output = Vec::new();
        engine.run_with(input.as_bytes(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("=1 \n"));
        assert!(text.contains("=2 \n"));
        assert!(text.contains("?3 unknown command: unknown"));
        assert!(!text.contains("nogo-mc"), "commands after quit must be ignored");
    }
}
