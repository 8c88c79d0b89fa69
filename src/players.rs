use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{AppErr, Result, league::League};

/// The amount of features describing a player.
pub const FEATURES: usize = 18;

/// A game id, a league and the features.
const COLUMNS: usize = FEATURES + 2;

/// A ranked player as described by one row of the replay dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub game_id: u64,
    pub league: League,
    /// Age, hours per week, total hours, APM, select by hotkeys, assign to hotkeys, unique
    /// hotkeys, minimap attacks, minimap right clicks, number of PACs, gap between PACs,
    /// action latency, actions in PAC, total map explored, workers made, unique units made,
    /// complex units made and complex abilities used, `-1` when unknown.
    pub features: [f64; FEATURES],
}

/// Reads every player of a CSV file, skipping its header line.
pub fn read_players<P: AsRef<Path>>(path: P) -> Result<Vec<Player>> {
    let file = File::open(path)?;
    parse_players(BufReader::new(file))
}

/// Parses every player of a CSV stream, skipping its header line and blank lines.
pub fn parse_players<R: BufRead>(reader: R) -> Result<Vec<Player>> {
    let mut players = Vec::new();

    for (i, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        players.push(parse_player(&line, i + 1)?);
    }

    Ok(players)
}

fn sanitize(cell: &str) -> String {
    let cell = cell.replace(['\\', '"'], "");
    cell.trim().replace('?', "-1")
}

fn parse_player(line: &str, line_no: usize) -> Result<Player> {
    let cells: Vec<_> = line.split(',').collect();
    if cells.len() < COLUMNS {
        return Err(AppErr::MissingColumns {
            line: line_no,
            got: cells.len(),
        });
    }

    let invalid = |column: usize| AppErr::InvalidValue {
        line: line_no,
        column: column + 1,
        value: cells[column].to_string(),
    };

    let game_id = sanitize(cells[0]).parse::<u64>().map_err(|_| invalid(0))?;

    let league = cells[1].replace(['\\', '"'], "");
    let league = league.trim().parse()?;

    let mut features = [0.; FEATURES];
    for (j, feature) in features.iter_mut().enumerate() {
        let column = j + 2;
        *feature = sanitize(cells[column])
            .parse::<f64>()
            .map_err(|_| invalid(column))?;
    }

    Ok(Player {
        game_id,
        league,
        features,
    })
}
