//! Mega-prompt analysis generator
//!
//! Produces placeholder deep-analysis text for an episode from fixed
//! tables keyed on where the episode falls in the opening arcs. Nothing
//! here reads the episode content beyond its number and title.

use crate::models::EpisodeRecord;
use crate::store::EpisodeStore;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::RangeInclusive;
use tracing::info;

static ACTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ACTION: episode (\d+)$").expect("action pattern is valid"));

/// Separator placed between analyses in a batch run
pub fn batch_separator() -> String {
    format!("\n{}\n\n", "=".repeat(80))
}

/// How much canned material to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisDepth {
    /// Generic synopsis, three beats per arc (HTTP route)
    #[default]
    Standard,
    /// Arc-specific synopsis, four beats per arc (batch tool)
    Extended,
}

/// Stretch of the opening episodes that shares one beat table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    RomanceDawn,
    Swordsman,
    Navigator,
    BuggyArc,
    UsoppArc,
}

impl Segment {
    pub fn for_episode(number: u32) -> Option<Self> {
        match number {
            0 => None,
            1 => Some(Segment::RomanceDawn),
            2 => Some(Segment::Swordsman),
            3 => Some(Segment::Navigator),
            4..=8 => Some(Segment::BuggyArc),
            _ => Some(Segment::UsoppArc),
        }
    }
}

/// One canned pivotal beat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Beat {
    pub title: &'static str,
    pub what_was_said: &'static str,
    pub why_this_matters: &'static str,
    pub subtext: &'static str,
}

const fn beat(
    title: &'static str,
    what_was_said: &'static str,
    why_this_matters: &'static str,
    subtext: &'static str,
) -> Beat {
    Beat {
        title,
        what_was_said,
        why_this_matters,
        subtext,
    }
}

/// Extract `N` from `ACTION: episode N`
///
/// Surrounding whitespace is ignored; anything else after the number is not.
pub fn parse_action(input: &str) -> Result<u32> {
    let invalid = || Error::InvalidInput("Invalid input format. Expected: ACTION: episode <N>".into());
    let caps = ACTION_PATTERN.captures(input.trim()).ok_or_else(invalid)?;
    caps[1].parse::<u32>().map_err(|_| invalid())
}

/// Characters introduced so far, comma-joined
pub fn focal_points(number: u32) -> String {
    let mut focal = String::from("Monkey D. Luffy");
    for (from, name) in [
        (2, "Roronoa Zoro"),
        (3, "Nami"),
        (5, "Captain Buggy"),
        (9, "Usopp"),
    ] {
        if number >= from {
            focal.push_str(", ");
            focal.push_str(name);
        }
    }
    focal
}

pub fn synopsis(number: u32, depth: AnalysisDepth) -> &'static [&'static str] {
    match depth {
        AnalysisDepth::Standard => STANDARD_SYNOPSIS,
        AnalysisDepth::Extended => match Segment::for_episode(number) {
            None => &[],
            Some(Segment::RomanceDawn) => EXTENDED_SYNOPSIS_ROMANCE_DAWN,
            Some(Segment::Swordsman) => EXTENDED_SYNOPSIS_SWORDSMAN,
            Some(Segment::Navigator) => EXTENDED_SYNOPSIS_NAVIGATOR,
            Some(Segment::BuggyArc) => EXTENDED_SYNOPSIS_BUGGY,
            Some(Segment::UsoppArc) => EXTENDED_SYNOPSIS_USOPP,
        },
    }
}

pub fn beats(number: u32, depth: AnalysisDepth) -> &'static [Beat] {
    let Some(segment) = Segment::for_episode(number) else {
        return &[];
    };
    match (depth, segment) {
        (AnalysisDepth::Standard, Segment::RomanceDawn) => STANDARD_ROMANCE_DAWN,
        (AnalysisDepth::Standard, Segment::Swordsman) => STANDARD_SWORDSMAN,
        (AnalysisDepth::Standard, Segment::Navigator) => STANDARD_NAVIGATOR,
        (AnalysisDepth::Standard, Segment::BuggyArc) => STANDARD_BUGGY,
        (AnalysisDepth::Standard, Segment::UsoppArc) => STANDARD_USOPP,
        (AnalysisDepth::Extended, Segment::RomanceDawn) => EXTENDED_ROMANCE_DAWN,
        (AnalysisDepth::Extended, Segment::Swordsman) => EXTENDED_SWORDSMAN,
        (AnalysisDepth::Extended, Segment::Navigator) => EXTENDED_NAVIGATOR,
        (AnalysisDepth::Extended, Segment::BuggyArc) => EXTENDED_BUGGY,
        (AnalysisDepth::Extended, Segment::UsoppArc) => EXTENDED_USOPP,
    }
}

/// Render the analysis text for one episode
pub fn render(number: u32, title: &str, depth: AnalysisDepth) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "### Episode {} – \"{}\" (air date unknown)\n\n",
        number, title
    ));

    out.push_str("**Synopsis:**\n");
    for point in synopsis(number, depth) {
        out.push_str(&format!("- {}\n", point));
    }

    out.push_str(&format!("\n**Focal Points:** {}\n\n", focal_points(number)));

    for (index, beat) in beats(number, depth).iter().enumerate() {
        out.push_str(&format!("{}. **{}**\n", index + 1, beat.title));
        out.push_str("**WHAT WAS SAID**\n");
        out.push_str(&format!("{}\n", beat.what_was_said));
        out.push_str("**WHY THIS MATTERS**\n");
        out.push_str(&format!("{}\n", beat.why_this_matters));
        out.push_str("**THE SUBTEXT**\n");
        out.push_str(&format!("{}\n\n", beat.subtext));
    }

    out
}

/// Render the analysis for a loaded record
pub fn generate(record: &EpisodeRecord, depth: AnalysisDepth) -> Result<String> {
    let number = record
        .number()
        .ok_or_else(|| Error::InvalidInput(format!("Episode \"{}\" has no number", record.title)))?;
    Ok(render(number, &record.title, depth))
}

/// Look up an episode and render its analysis
///
/// # Errors
///
/// `NotFound` when no episode file carries that number.
pub async fn generate_for(store: &EpisodeStore, number: u32, depth: AnalysisDepth) -> Result<String> {
    let record = store
        .find(number)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Episode {} not found", number)))?;
    generate(&record, depth)
}

/// Render every episode in `range`, separated by a rule line
///
/// Stops at the first missing episode.
pub async fn generate_batch(
    store: &EpisodeStore,
    range: RangeInclusive<u32>,
    depth: AnalysisDepth,
) -> Result<String> {
    let mut all = String::new();
    let separator = batch_separator();
    for number in range {
        info!("Processing Episode {}...", number);
        all.push_str(&generate_for(store, number, depth).await?);
        all.push_str(&separator);
    }
    Ok(all)
}

const STANDARD_SYNOPSIS: &[&str] = &[
    "Introduction of key characters",
    "Establishment of main conflict",
    "Development of character relationships",
    "Advancement of plot elements",
];

const EXTENDED_SYNOPSIS_ROMANCE_DAWN: &[&str] = &[
    "Introduction of the main protagonist and his dream",
    "Establishment of supernatural powers through Devil Fruits",
    "First demonstration of combat abilities",
    "Setting up the journey to become Pirate King",
];

const EXTENDED_SYNOPSIS_SWORDSMAN: &[&str] = &[
    "Recruitment of the first crew member",
    "Introduction of honor and loyalty themes",
    "Establishment of crew dynamics",
    "First major character development",
];

const EXTENDED_SYNOPSIS_NAVIGATOR: &[&str] = &[
    "Introduction of mysterious new character",
    "Revelation of corruption in authority",
    "First major team battle",
    "Establishment of moral complexity",
];

const EXTENDED_SYNOPSIS_BUGGY: &[&str] = &[
    "Confrontation with major antagonist",
    "Exploration of Devil Fruit power dynamics",
    "Team coordination in battle",
    "Overcoming seemingly invincible opponent",
];

const EXTENDED_SYNOPSIS_USOPP: &[&str] = &[
    "Introduction of character with personal flaws",
    "Confrontation with real danger",
    "Character growth through adversity",
    "Demonstration of true courage",
];

const STANDARD_ROMANCE_DAWN: &[Beat] = &[
    beat(
        "Luffy's Introduction",
        "I'm Monkey D. Luffy, and I'm gonna be the Pirate King!",
        "Establishes Luffy's core motivation and dream that drives the entire series.",
        "Luffy's declaration reveals his unwavering determination and sets up the central theme of pursuing impossible dreams.",
    ),
    beat(
        "Devil Fruit Powers Revealed",
        "I ate the Gum-Gum Devil Fruit, so I'm a rubber man!",
        "Introduces the supernatural element of Devil Fruits and Luffy's unique abilities.",
        "The Devil Fruit represents both power and sacrifice, as Luffy gains abilities but loses the ability to swim.",
    ),
    beat(
        "First Battle Display",
        "Gum-Gum Pistol!",
        "Demonstrates Luffy's combat abilities and creative use of his rubber powers.",
        "Luffy's fighting style reflects his personality—direct, creative, and unorthodox.",
    ),
];

const STANDARD_SWORDSMAN: &[Beat] = &[
    beat(
        "Zoro's Captivity",
        "I'd rather die than break my promise to a friend.",
        "Introduces Zoro's character and his strict code of honor.",
        "Zoro's willingness to die for a promise shows his extreme dedication to his word.",
    ),
    beat(
        "Luffy's Recruitment",
        "Join my crew! I need a swordsman!",
        "Luffy begins building his pirate crew, starting with Zoro.",
        "Luffy's direct approach to recruitment shows his confidence and ability to recognize talent.",
    ),
    beat(
        "First Crew Formation",
        "I'll join you, but only if you become the Pirate King!",
        "Zoro accepts Luffy's offer, forming the foundation of the Straw Hat Pirates.",
        "Zoro's condition shows his respect for Luffy's dream and his own high standards.",
    ),
];

const STANDARD_NAVIGATOR: &[Beat] = &[
    beat(
        "Nami's Mysterious Appearance",
        "I'm a navigator. I can help you get to the Grand Line.",
        "Introduces Nami and her crucial role as navigator for the crew.",
        "Nami's mysterious nature and hidden agenda create tension and intrigue.",
    ),
    beat(
        "Morgan's Corruption",
        "I am the great Captain Morgan! Bow before me!",
        "Establishes that not all marines are good, introducing moral complexity.",
        "Morgan's corruption represents the flawed nature of authority and justice systems.",
    ),
    beat(
        "First Major Battle",
        "I won't let you hurt my friends!",
        "Luffy and Zoro fight together for the first time, establishing their partnership.",
        "The battle demonstrates the crew's growing bond and Luffy's protective nature.",
    ),
];

const STANDARD_BUGGY: &[Beat] = &[
    beat(
        "Buggy's Introduction",
        "I am Captain Buggy the Clown! Tremble before my power!",
        "Introduces the first major antagonist and Devil Fruit user as enemy.",
        "Buggy's theatrical nature contrasts with Luffy's genuine personality.",
    ),
    beat(
        "Devil Fruit Battle",
        "Chop-Chop Devil Fruit powers!",
        "Shows the variety of Devil Fruit abilities and their strategic use in combat.",
        "The battle demonstrates how different Devil Fruit powers interact and counter each other.",
    ),
    beat(
        "Crew Coordination",
        "We fight together!",
        "Establishes the crew's ability to work as a team against powerful enemies.",
        "The coordinated effort shows the crew's growing trust and teamwork.",
    ),
];

const STANDARD_USOPP: &[Beat] = &[
    beat(
        "Usopp's Introduction",
        "Pirates are coming! Pirates are coming!",
        "Introduces Usopp and his tendency to lie, establishing his character flaw.",
        "Usopp's lies stem from his desire for attention and his underlying fear of real danger.",
    ),
    beat(
        "Real Threat Emerges",
        "This time it's real!",
        "Usopp's lies become reality, forcing him to confront his fears.",
        "The situation forces Usopp to choose between running away or standing his ground.",
    ),
    beat(
        "Courage in Crisis",
        "I won't run away! I'll protect my village!",
        "Usopp overcomes his fear and demonstrates true courage.",
        "Usopp's transformation shows that courage isn't the absence of fear, but acting despite it.",
    ),
];

const EXTENDED_ROMANCE_DAWN: &[Beat] = &[
    beat(
        "Luffy's Dream Declaration",
        "I'm Monkey D. Luffy, and I'm gonna be the Pirate King!",
        "Establishes the central driving force of the entire series and Luffy's unwavering determination.",
        "Luffy's declaration isn't just a goal—it's a fundamental part of his identity that will guide every decision he makes.",
    ),
    beat(
        "Devil Fruit Revelation",
        "I ate the Gum-Gum Devil Fruit, so I'm a rubber man!",
        "Introduces the supernatural element that defines the world and Luffy's unique abilities.",
        "The Devil Fruit represents the series' theme of sacrifice for power—Luffy gains abilities but loses the ability to swim, a crucial limitation for a pirate.",
    ),
    beat(
        "First Combat Display",
        "Gum-Gum Pistol!",
        "Demonstrates Luffy's creative combat style and establishes his fighting philosophy.",
        "Luffy's unorthodox fighting style reflects his personality—direct, creative, and unafraid to break conventional rules.",
    ),
    beat(
        "Barrel Escape",
        "I need to find a crew!",
        "Sets up the crew-building aspect that will drive much of the early series.",
        "Luffy's recognition that he can't achieve his dream alone shows his understanding of the importance of friendship and teamwork.",
    ),
];

const EXTENDED_SWORDSMAN: &[Beat] = &[
    beat(
        "Zoro's Honor Display",
        "I'd rather die than break my promise to a friend.",
        "Introduces Zoro's core character trait of extreme loyalty and honor.",
        "Zoro's willingness to die for a promise shows his rigid moral code, which will both help and hinder him throughout the series.",
    ),
    beat(
        "Luffy's Direct Recruitment",
        "Join my crew! I need a swordsman!",
        "Shows Luffy's confidence and ability to recognize talent, beginning the crew formation process.",
        "Luffy's direct approach reveals his leadership style—he sees potential and goes after it without hesitation.",
    ),
    beat(
        "Zoro's Conditional Acceptance",
        "I'll join you, but only if you become the Pirate King!",
        "Establishes the mutual respect and high standards that will define their relationship.",
        "Zoro's condition shows he won't follow just anyone—he needs to believe in his captain's dream and capabilities.",
    ),
    beat(
        "First Crew Bond",
        "We're partners now!",
        "Solidifies the first crew relationship and establishes the foundation of the Straw Hat Pirates.",
        "The partnership dynamic will become crucial as the crew grows, with each member bringing unique skills and perspectives.",
    ),
];

const EXTENDED_NAVIGATOR: &[Beat] = &[
    beat(
        "Nami's Mysterious Offer",
        "I'm a navigator. I can help you get to the Grand Line.",
        "Introduces a crucial crew position and a character with hidden motives.",
        "Nami's mysterious nature and hidden agenda create tension and foreshadow future conflicts within the crew.",
    ),
    beat(
        "Morgan's Corruption Revealed",
        "I am the great Captain Morgan! Bow before me!",
        "Establishes that authority figures can be corrupt, introducing moral complexity to the world.",
        "Morgan's corruption represents the series' theme that justice and authority are not always aligned, setting up future conflicts with the World Government.",
    ),
    beat(
        "Luffy's Protective Instinct",
        "I won't let you hurt my friends!",
        "Demonstrates Luffy's protective nature and his commitment to his crew.",
        "Luffy's protective instinct will become a defining trait, driving many of his decisions and battles throughout the series.",
    ),
    beat(
        "First Team Battle",
        "We fight together!",
        "Establishes the crew's ability to coordinate in combat and trust each other.",
        "The coordinated battle shows how the crew's different abilities complement each other, a theme that will be crucial in future fights.",
    ),
];

const EXTENDED_BUGGY: &[Beat] = &[
    beat(
        "Buggy's Grand Entrance",
        "I am Captain Buggy the Clown! Tremble before my power!",
        "Introduces the first major antagonist and establishes the threat level of Devil Fruit users.",
        "Buggy's theatrical nature contrasts with Luffy's genuine personality, highlighting the difference between showmanship and true strength.",
    ),
    beat(
        "Devil Fruit Power Display",
        "Chop-Chop Devil Fruit powers!",
        "Shows the variety and strategic complexity of Devil Fruit abilities in combat.",
        "The battle demonstrates how different Devil Fruit powers interact, establishing the series' complex power system.",
    ),
    beat(
        "Crew Coordination",
        "We fight together!",
        "Establishes the crew's ability to work as a cohesive unit against powerful enemies.",
        "The coordinated effort shows the crew's growing trust and teamwork, essential for their survival in the dangerous world.",
    ),
    beat(
        "Victory Through Unity",
        "We did it together!",
        "Demonstrates that teamwork and friendship can overcome seemingly impossible odds.",
        "The victory reinforces the series' central theme that true strength comes from bonds with others, not just individual power.",
    ),
];

const EXTENDED_USOPP: &[Beat] = &[
    beat(
        "Usopp's False Alarms",
        "Pirates are coming! Pirates are coming!",
        "Introduces Usopp's character flaw and establishes his relationship with the village.",
        "Usopp's lies stem from his desire for attention and his underlying fear of real danger, revealing his complex psychology.",
    ),
    beat(
        "Real Threat Emerges",
        "This time it's real!",
        "Usopp's lies become reality, forcing him to confront his fears and take responsibility.",
        "The situation forces Usopp to choose between his instinct to run and his duty to protect his friends.",
    ),
    beat(
        "Courage in the Face of Fear",
        "I won't run away! I'll protect my village!",
        "Usopp overcomes his fear and demonstrates true courage, beginning his character development.",
        "Usopp's transformation shows that courage isn't the absence of fear, but the willingness to act despite it.",
    ),
    beat(
        "Acceptance of Responsibility",
        "I have to protect what's important to me!",
        "Usopp accepts his role as protector and begins to mature as a character.",
        "Usopp's acceptance of responsibility marks his transition from a boy who lies for attention to a man who fights for others.",
    ),
];
