//! Locally synthesized summary used when no AI narrative is available.
//!
//! Framing is chosen by plain substring matching on the tech readiness
//! answer. The matching is deliberately crude and kept stable so reports
//! read the same as earlier versions; paraphrased answers fall through to
//! the neutral framing.

/// Tone chosen from the tech readiness answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    Cautious,
    Enthusiastic,
    Neutral,
}

const CAUTIOUS_MARKERS: [&str; 2] = ["resistant", "hesitant"];
const ENTHUSIASTIC_MARKERS: [&str; 2] = ["open", "eager"];

pub const GENERIC_SUMMARY: &str = "Based on your responses, there are clear opportunities to save time by automating repetitive work across your business. The sections below show where your biggest gains are and which tools can help you get there.";

const CAUTIOUS_TEXT: &str = "Because your team prefers a measured pace of change, start with one low-risk automation, show the time it saves, and expand from there.";
const ENTHUSIASTIC_TEXT: &str = "Your team's appetite for new tools means you can move quickly: pick the two highest-impact recommendations below and roll them out this quarter.";
const NEUTRAL_TEXT: &str = "A steady, step-by-step rollout will let your team see results early without disrupting how they work today.";

/// Picks the framing for a tech readiness answer. Cautious markers win.
pub fn framing(tech_readiness: Option<&str>) -> Framing {
    let Some(readiness) = tech_readiness else {
        return Framing::Neutral;
    };
    let readiness = readiness.to_lowercase();

    if CAUTIOUS_MARKERS.iter().any(|m| readiness.contains(m)) {
        Framing::Cautious
    } else if ENTHUSIASTIC_MARKERS.iter().any(|m| readiness.contains(m)) {
        Framing::Enthusiastic
    } else {
        Framing::Neutral
    }
}

/// Builds the fallback summary paragraph.
pub fn personalized_summary(pain_point: Option<&str>, tech_readiness: Option<&str>) -> String {
    let pain_point = pain_point.map(str::trim).filter(|p| !p.is_empty());
    let tech_readiness = tech_readiness.map(str::trim).filter(|t| !t.is_empty());

    if pain_point.is_none() && tech_readiness.is_none() {
        return GENERIC_SUMMARY.to_string();
    }

    let mut text = String::new();
    match pain_point {
        Some(pain) => text.push_str(&format!(
            "You told us that \"{}\" is the most frustrating part of your week, so the recommendations below focus on the workflows most likely to relieve it. ",
            pain
        )),
        None => text.push_str(
            "Your answers point to several workflows where automation can give your team hours back every week. ",
        ),
    }

    text.push_str(match framing(tech_readiness) {
        Framing::Cautious => CAUTIOUS_TEXT,
        Framing::Enthusiastic => ENTHUSIASTIC_TEXT,
        Framing::Neutral => NEUTRAL_TEXT,
    });
    text
}
