//! Sports match page.

use maud::{Markup, html};
use vitrina_core::PageHead;
use vitrina_core::snapshot::MatchContent;

use super::components::{facts, format_datetime, iso};

pub fn render(fixture: &MatchContent) -> Markup {
    html! {
        article class="match" {
            div class="hero" {
                div class="badges" { span class="badge" { (fixture.competition) } }
                h1 { (fixture.home_team) " - " (fixture.away_team) }
                p class="lead" {
                    time datetime=(iso(fixture.kickoff)) { (format_datetime(fixture.kickoff)) }
                }
            }
            div class="scoreboard" {
                span { (fixture.home_team) }
                @match fixture.score {
                    Some(score) => {
                        span class="score" { (score.home) " : " (score.away) }
                    }
                    None => {
                        span class="score" { "vs" }
                    }
                }
                span { (fixture.away_team) }
            }
            (facts(&[
                ("Competiție", Some(fixture.competition.clone())),
                ("Stadion", fixture.venue.clone()),
            ]))
            @if !fixture.broadcasters.is_empty() {
                section class="section" {
                    h2 { "Unde îl vezi" }
                    div class="badges" {
                        @for channel in &fixture.broadcasters {
                            span class="badge" { (channel) }
                        }
                    }
                }
            }
        }
    }
}

pub fn head(fixture: &MatchContent) -> PageHead {
    let title = match fixture.score {
        Some(score) => format!(
            "{} {}-{} {}",
            fixture.home_team, score.home, score.away, fixture.away_team
        ),
        None => format!("{} - {}", fixture.home_team, fixture.away_team),
    };

    PageHead {
        title,
        description: format!(
            "{}, {}",
            fixture.competition,
            format_datetime(fixture.kickoff)
        ),
        image: None,
        og_type: "website".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use vitrina_core::snapshot::Score;

    fn derby(score: Option<Score>) -> MatchContent {
        MatchContent {
            id: "fcsb-dinamo".to_string(),
            competition: "Superliga".to_string(),
            home_team: "FCSB".to_string(),
            away_team: "Dinamo".to_string(),
            kickoff: Utc.with_ymd_and_hms(2025, 10, 5, 18, 30, 0).unwrap(),
            venue: None,
            broadcasters: vec!["Digi Sport 1".to_string()],
            score,
        }
    }

    #[test]
    fn scheduled_match_shows_vs() {
        let html = render(&derby(None)).into_string();
        assert!(html.contains(">vs<"));
        assert!(html.contains("Digi Sport 1"));
        assert_eq!(head(&derby(None)).title, "FCSB - Dinamo");
    }

    #[test]
    fn played_match_shows_score() {
        let fixture = derby(Some(Score { home: 2, away: 1 }));
        assert!(render(&fixture).into_string().contains("2 : 1"));
        assert_eq!(head(&fixture).title, "FCSB 2-1 Dinamo");
    }
}
