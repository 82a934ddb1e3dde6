//! Chat-facing texts.

use std::fmt::Write;

use sweatbot_domain::leaderboard::{Leaderboard, StandingStatus};

pub const UNKNOWN_SENDER: &str = "Unknown";

pub fn report_accepted(name: &str, activity_count: u32) -> String {
    format!(
        "Laporan diterima, {} sudah berkeringat {} hari. Lanjutkan 🔥",
        name, activity_count
    )
}

pub fn report_rejected(name: &str) -> String {
    format!("{} sudah laporan hari ini, ayo jangan curang! 😉", name)
}

pub fn leaderboard(board: &Leaderboard) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "30 Days of Sweat Challenge – Day {} ({})\n",
        board.day(),
        board.date().format("%d-%m-%Y")
    );
    let _ = writeln!(out, "Recap day {}:", board.day());
    let _ = writeln!(out, "{} peoples keep the streak 🔥", board.active().len());
    let _ = writeln!(out, "{} lose the streak 💔", board.lost().len());
    out.push_str("\nUpdate klasemen sementara:\n");

    for standing in board.standings() {
        let _ = match standing.status {
            StandingStatus::Active => writeln!(
                out,
                "{}. {} - {} days streak 🔥",
                standing.rank, standing.display_name, standing.streak
            ),
            StandingStatus::Lost => writeln!(
                out,
                "{}. {} - Day {} 💔",
                standing.rank, standing.display_name, standing.activity_count
            ),
        };
    }

    out.push_str(
        "\nYang udah keringetan langsung update/posting aja nanti dimasukkin klasemen 💪\n\nSemangat🔥",
    );
    out
}
