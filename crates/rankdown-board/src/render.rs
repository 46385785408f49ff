//! Plain-text rendering of a board for terminals.

use std::fmt;

use rankdown_core::Issue;

use crate::board::{Board, RoundBoard, VoteLine};

/// `Display` adapter that lays a [`Board`] out as text.
pub struct BoardText<'a>(pub &'a Board);

impl fmt::Display for BoardText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        writeln!(f, "{}", board.title)?;
        writeln!(f, "Updated: {}", board.updated_at)?;
        writeln!(f, "Players: {}", board.players.len())?;

        match &board.round {
            Some(round) => write_round(f, round)?,
            None => writeln!(f, "\nNo active round")?,
        }

        writeln!(f, "\nEliminated")?;
        if board.eliminated.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for entry in &board.eliminated {
            let round = entry
                .round
                .map(|n| n.to_string())
                .unwrap_or_else(|| "?".to_string());
            writeln!(f, "  R{:<3} {:<20} {}", round, entry.name, entry.label)?;
        }

        if !board.issues.is_empty() {
            writeln!(f)?;
            write!(f, "{}", IssuesText(&board.issues))?;
        }
        Ok(())
    }
}

fn write_round(f: &mut fmt::Formatter<'_>, round: &RoundBoard) -> fmt::Result {
    match round.number {
        Some(n) => writeln!(f, "\nRound {}", n)?,
        None => writeln!(f, "\nRound ?")?,
    }
    if let Some(nominator) = &round.nominator {
        writeln!(f, "Nominator: {}", nominator)?;
    }
    for tile in &round.nominees {
        writeln!(f, "  {:<20} {}", tile.name, tile.label)?;
    }
    writeln!(
        f,
        "Saves in: {}  Elims in: {}  Unresolved: {}",
        round.tally.saves_in, round.tally.elims_in, round.tally.pending
    )?;
    write_votes(f, "Saves", &round.saves)?;
    write_votes(f, "Elims", &round.elims)
}

fn write_votes(f: &mut fmt::Formatter<'_>, heading: &str, votes: &[VoteLine]) -> fmt::Result {
    if votes.is_empty() {
        return Ok(());
    }
    writeln!(f, "{}", heading)?;
    for vote in votes {
        writeln!(f, "  {} -> {}", vote.voter, vote.target)?;
    }
    Ok(())
}

/// `Display` adapter for a list of validator findings.
pub struct IssuesText<'a>(pub &'a [Issue]);

impl fmt::Display for IssuesText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Issues ({})", self.0.len())?;
        for issue in self.0 {
            writeln!(f, "  {}", issue)?;
        }
        Ok(())
    }
}
