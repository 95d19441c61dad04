//! Scripted in-character chat.
//!
//! Messages are sorted into a [`Topic`] by keyword. A character answers from
//! its class's lines for that topic; messages with no topic get a reply built
//! from the character's own sheet (story, goals, ideals, and so on).

use crate::character::Character;
use rand::seq::SliceRandom;
use rand::Rng;

/// Number of prompts returned by [`ChatEngine::suggested_questions`].
pub const SUGGESTED_QUESTION_COUNT: usize = 3;

/// Longest story excerpt quoted back, in characters.
const STORY_EXCERPT_LEN: usize = 100;

/// What a message is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Greeting,
    Farewell,
    Combat,
    Magic,
    Training,
    Nature,
    Faith,
    Music,
    Power,
    Stealth,
    General,
}

/// Checked in order; the first topic with a matching keyword wins.
const TOPIC_KEYWORDS: &[(Topic, &[&str])] = &[
    (Topic::Greeting, &["hello", "hi", "hey", "greetings", "good morning", "good evening"]),
    (Topic::Farewell, &["goodbye", "bye", "farewell", "see you", "later"]),
    (Topic::Combat, &["battle", "combat", "fight", "fighting", "war", "enemy", "enemies"]),
    (Topic::Magic, &["magic", "spell", "spells", "arcane", "cast", "casting"]),
    (Topic::Training, &["training", "train", "practice", "study", "learning"]),
    (Topic::Nature, &["nature", "forest", "animal", "animals", "earth", "plants", "wild"]),
    (Topic::Faith, &["faith", "god", "gods", "prayer", "blessing", "sacred", "divine"]),
    (Topic::Music, &["music", "song", "songs", "art", "poetry", "tale", "tales"]),
    (Topic::Power, &["power", "strength", "energy"]),
    (Topic::Stealth, &["stealth", "shadow", "shadows", "thief", "sneak", "sneaky", "silent"]),
];

const SUGGESTED_QUESTIONS: &[&str] = &[
    "What did you learn today?",
    "What do you think of our last adventure?",
    "How do you feel about your progress?",
    "What keeps you going?",
    "What are you afraid of?",
    "What is your greatest strength?",
    "What would you like to improve?",
    "How do you get along with your companions?",
    "What do you think about magic?",
    "What is your greatest achievement so far?",
];

/// Sort a message into a topic. Single words match whole words only.
pub fn classify(message: &str) -> Topic {
    let lowered = message.to_lowercase();
    TOPIC_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| mentions(&lowered, k)))
        .map_or(Topic::General, |(topic, _)| *topic)
}

fn mentions(lowered: &str, keyword: &str) -> bool {
    if keyword.contains(' ') {
        return lowered.contains(keyword);
    }
    lowered
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word == keyword)
}

fn mentions_any(lowered: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| mentions(lowered, k))
}

/// Stateless responder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatEngine;

impl ChatEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn respond(&self, character: &Character, message: &str) -> String {
        self.respond_with_rng(character, message, &mut rand::thread_rng())
    }

    pub fn respond_with_rng<R: Rng + ?Sized>(
        &self,
        character: &Character,
        message: &str,
        rng: &mut R,
    ) -> String {
        let topic = classify(message);

        let class_table = class_lines(&character.char_class);
        if let Some(line) = pick(lines_for(class_table, topic), rng) {
            return line;
        }
        if topic != Topic::General {
            if let Some(line) = pick(lines_for(class_table, Topic::Greeting), rng) {
                return line;
            }
        }
        if let Some(line) = pick(general_lines(topic), rng) {
            return line;
        }
        contextual_reply(character, &message.to_lowercase())
    }

    /// Respond and append the exchange to the character's chat history.
    pub fn chat(&self, character: &mut Character, message: &str) -> String {
        let reply = self.respond(character, message);
        character.record_chat(message, reply.clone());
        reply
    }

    pub fn suggested_questions(&self) -> Vec<String> {
        self.suggested_questions_with_rng(&mut rand::thread_rng())
    }

    /// Three distinct prompts.
    pub fn suggested_questions_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<String> {
        SUGGESTED_QUESTIONS
            .choose_multiple(rng, SUGGESTED_QUESTION_COUNT)
            .map(|q| q.to_string())
            .collect()
    }
}

fn pick<R: Rng + ?Sized>(lines: &[&str], rng: &mut R) -> Option<String> {
    lines.choose(rng).map(|line| line.to_string())
}

fn lines_for(table: ClassLines, topic: Topic) -> &'static [&'static str] {
    table
        .iter()
        .find(|(t, _)| *t == topic)
        .map(|(_, lines)| lines.as_slice())
        .unwrap_or(&[])
}

/// A reply drawn from the character sheet when no scripted line fits.
fn contextual_reply(character: &Character, lowered: &str) -> String {
    if mentions_any(lowered, &["background", "story", "past", "history"]) {
        return if character.background_story.is_empty() {
            "My past is... complicated. I don't like to talk about it much.".to_string()
        } else {
            format!(
                "My story... {} It is part of what made me who I am today.",
                excerpt(&character.background_story)
            )
        };
    }

    if mentions_any(lowered, &["goal", "goals", "objective", "objectives", "plan", "plans"]) {
        return if !character.short_term_goals.is_empty() {
            format!(
                "My immediate goals are {}. They keep me focused on the present.",
                character.short_term_goals
            )
        } else if !character.long_term_goals.is_empty() {
            format!(
                "My long-term goal is {}. It is what drives me forward.",
                character.long_term_goals
            )
        } else if !character.personal_goals.is_empty() {
            format!("Personally, I want {}.", character.personal_goals)
        } else {
            "I am still discovering what my true goals in life are.".to_string()
        };
    }

    if mentions_any(lowered, &["personality", "character", "yourself", "describe"]) {
        return if !character.personality_tags.is_empty() {
            format!(
                "I would describe myself as {}. Those are the qualities that define me most.",
                first_n(&character.personality_tags, 3)
            )
        } else if !character.personality_traits.is_empty() {
            format!("My personality... {}", character.personality_traits)
        } else {
            "I am... complex. Like everyone, I suppose. What part of me interests you?".to_string()
        };
    }

    if mentions_any(lowered, &["ideal", "ideals", "belief", "beliefs", "value", "values"]) {
        return if character.ideals.is_empty() {
            "I have my own beliefs about right and wrong.".to_string()
        } else {
            format!("My ideals matter to me: {}", character.ideals)
        };
    }

    if mentions_any(lowered, &["bond", "bonds", "family", "connection", "friends"]) {
        return if character.bonds.is_empty() {
            "Connections with others matter, even if they get complicated.".to_string()
        } else {
            format!("My most important bonds... {}", character.bonds)
        };
    }

    if mentions_any(lowered, &["flaw", "flaws", "weakness", "weaknesses", "mistake"]) {
        return if character.flaws.is_empty() {
            "We all have flaws. Mine... well, I'd rather not talk about them.".to_string()
        } else {
            format!(
                "My flaws... {} They are part of what makes me human, don't you think?",
                character.flaws
            )
        };
    }

    if mentions_any(lowered, &["strong", "strength", "muscle", "muscles"]) {
        let str_mod = character.modifier(crate::abilities::Ability::Strength);
        return match str_mod {
            m if m >= 2 => {
                "My strength is my greatest pride. Few can match me in close combat.".to_string()
            }
            m if m >= 0 => "My strength is adequate for my needs.".to_string(),
            _ => "Strength is not my specialty, but I have other qualities.".to_string(),
        };
    }

    if mentions_any(lowered, &["level", "experience"]) {
        return match character.level {
            l if l >= 10 => format!(
                "With {l} levels of experience, I have seen a lot on my adventures."
            ),
            l if l >= 5 => format!("As a level {l} adventurer, I gain experience every day."),
            _ => "I am fairly new to this, but I learn fast.".to_string(),
        };
    }

    if mentions_any(lowered, &["skill", "skills", "abilities"]) {
        return if character.skills.is_empty() {
            "I am still developing my skills.".to_string()
        } else {
            format!(
                "My skills include {}. They have served me well on my adventures.",
                first_n(&character.skills, 3)
            )
        };
    }

    if mentions_any(lowered, &["spell", "spells"]) {
        let spells = character.spells();
        return if spells.is_empty() {
            "Magic is not my specialty, but I respect its power.".to_string()
        } else {
            format!("I know several useful spells, like {}.", first_n(&spells, 2))
        };
    }

    let nature = if character.personality_tags.is_empty() {
        String::new()
    } else {
        format!(" I am {} by nature.", first_n(&character.personality_tags, 2))
    };
    format!(
        "As {} {} {}, I have a unique perspective on things.{} What would you like to know?",
        article(&character.race),
        character.race,
        character.char_class,
        nature
    )
}

fn article(word: &str) -> &'static str {
    match word.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

fn excerpt(story: &str) -> String {
    if story.chars().count() > STORY_EXCERPT_LEN {
        let cut: String = story.chars().take(STORY_EXCERPT_LEN).collect();
        format!("{cut}...")
    } else {
        story.to_string()
    }
}

fn first_n(items: &[String], n: usize) -> String {
    items
        .iter()
        .take(n)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Scripted lines
// ============================================================================

type ClassLines = &'static [(Topic, [&'static str; 3])];

fn general_lines(topic: Topic) -> &'static [&'static str] {
    match topic {
        Topic::Greeting => &[
            "Hello! How are you today?",
            "It's a pleasure to see you again.",
            "What adventures await us today?",
        ],
        Topic::Farewell => &[
            "Have a good day.",
            "Until the next adventure.",
            "May the gods protect you.",
        ],
        _ => &[],
    }
}

fn class_lines(class: &str) -> ClassLines {
    match class {
        "Fighter" => &[
            (Topic::Greeting, [
                "Greetings, warrior! I am ready for battle.",
                "A fighter is always prepared. What do you need?",
                "My sword is at your service.",
            ]),
            (Topic::Combat, [
                "Battle is where I shine. Every blow counts.",
                "I have trained my whole life for this. I will not disappoint.",
                "In combat, tactics matter as much as strength.",
            ]),
            (Topic::Training, [
                "Daily training is the key to success.",
                "A warrior never stops learning new techniques.",
                "Discipline is my greatest weapon.",
            ]),
        ],
        "Wizard" => &[
            (Topic::Greeting, [
                "Knowledge is power. What wisdom do you seek?",
                "The arcane calls to me. What mystery shall we investigate?",
                "Magic flows through me. What do you need?",
            ]),
            (Topic::Magic, [
                "Spells are like poems, each with its own beauty.",
                "The study of magic is an endless journey.",
                "Every incantation reveals a new secret of the universe.",
            ]),
            (Topic::Training, [
                "Ancient books hold lost secrets.",
                "Knowledge is the greatest wealth.",
                "Every day I learn something new about magic.",
            ]),
        ],
        "Cleric" => &[
            (Topic::Greeting, [
                "May the gods bless you. How can I help?",
                "Faith guides my every step.",
                "My deity grants me strength and wisdom.",
            ]),
            (Topic::Faith, [
                "My faith is my shield and my sword.",
                "The gods protect us at every moment.",
                "Prayer connects me with the divine.",
            ]),
        ],
        "Rogue" => &[
            (Topic::Greeting, [
                "Silence and stealth, that's my specialty.",
                "The shadows are my allies.",
                "A thief always finds a way out.",
            ]),
            (Topic::Stealth, [
                "The shadows are second nature to me.",
                "Sometimes the best strategy is not to be seen.",
                "Stealth is an art that takes practice.",
            ]),
        ],
        "Ranger" => &[
            (Topic::Greeting, [
                "Nature is my home and my guide.",
                "The forests taught me everything I know.",
                "The wild calls to me.",
            ]),
            (Topic::Nature, [
                "Every animal has something to teach us.",
                "Nature is wise and patient.",
                "The forests keep ancient secrets.",
            ]),
        ],
        "Paladin" => &[
            (Topic::Greeting, [
                "Justice and honor guide me.",
                "My oath is my life.",
                "For light and justice, I am here.",
            ]),
            (Topic::Faith, [
                "Justice must be relentless but compassionate.",
                "Every action must reflect my values.",
                "Honor is not just a word, it is a way of life.",
            ]),
            (Topic::Combat, [
                "Protecting the innocent is my sacred duty.",
                "My shield guards those who cannot guard themselves.",
                "Defending the weak is my mission.",
            ]),
        ],
        "Bard" => &[
            (Topic::Greeting, [
                "A song to brighten your day!",
                "Stories and melodies are my life.",
                "The art of the word is my magic.",
            ]),
            (Topic::Music, [
                "Music has the power to change hearts.",
                "Every song tells a story.",
                "Art is the purest form of expression.",
            ]),
        ],
        "Sorcerer" => &[
            (Topic::Greeting, [
                "Magic flows in my veins.",
                "Arcane power is part of my being.",
                "My blood holds ancient secrets.",
            ]),
            (Topic::Power, [
                "Power must be used wisely.",
                "Wild magic is as much a blessing as a curse.",
                "Every spell is an expression of my essence.",
            ]),
            (Topic::Magic, [
                "My magical lineage defines me.",
                "The secrets of my blood grant me power.",
                "Arcane heritage is my destiny.",
            ]),
        ],
        "Warlock" => &[
            (Topic::Greeting, [
                "My patron grants me power, but at a price.",
                "Arcane secrets are my specialty.",
                "The pact has changed me forever.",
            ]),
            (Topic::Power, [
                "The pact is both blessing and burden.",
                "My patron demands absolute loyalty.",
                "Power has a price I must pay.",
            ]),
            (Topic::Magic, [
                "Arcane secrets are dangerous but powerful.",
                "Forbidden knowledge is my specialty.",
                "Every secret revealed makes me stronger.",
            ]),
        ],
        "Monk" => &[
            (Topic::Greeting, [
                "Inner peace is my greatest achievement.",
                "Balance between body and mind is essential.",
                "Discipline is the path to enlightenment.",
            ]),
            (Topic::Training, [
                "Discipline is the foundation of all achievement.",
                "Self-control is my greatest strength.",
                "Mastery of the body is only the first step.",
            ]),
        ],
        "Druid" => &[
            (Topic::Greeting, [
                "Nature speaks to me at every moment.",
                "I am one with the natural world.",
                "The spirits of the earth guide me.",
            ]),
            (Topic::Nature, [
                "Nature is wise and patient.",
                "Every form of life has its purpose.",
                "The natural balance must be respected.",
            ]),
            (Topic::Magic, [
                "Changing shape is like changing perspective.",
                "Every animal form teaches me something new.",
                "Transformation is a sacred gift.",
            ]),
        ],
        "Barbarian" => &[
            (Topic::Greeting, [
                "Rage makes me stronger!",
                "Combat is my life and my passion.",
                "My tribe forged me in the fire of battle.",
            ]),
            (Topic::Combat, [
                "Rage is my most powerful weapon.",
                "In combat, control matters as much as strength.",
                "Fury must be channeled, not suppressed.",
            ]),
        ],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::AbilityScores;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("Hello there"), Topic::Greeting);
        assert_eq!(classify("Goodbye, friend"), Topic::Farewell);
        assert_eq!(classify("Tell me about the battle"), Topic::Combat);
        assert_eq!(classify("Which SPELL do you like?"), Topic::Magic);
        assert_eq!(classify("Do you believe in the gods?"), Topic::Faith);
        assert_eq!(classify("Tell me about your past"), Topic::General);
    }

    #[test]
    fn test_classify_matches_whole_words() {
        // "this" and "history" contain "hi" but are not greetings
        assert_eq!(classify("What is this history?"), Topic::General);
        assert_eq!(classify("good morning"), Topic::Greeting);
    }

    #[test]
    fn test_class_topic_line() {
        let c = Character::new("Bran", "Human", "Fighter", "Soldier");
        let reply = ChatEngine.respond_with_rng(&c, "Ready for combat?", &mut rng());
        assert!(lines_for(class_lines("Fighter"), Topic::Combat).contains(&reply.as_str()));
    }

    #[test]
    fn test_missing_class_topic_falls_back_to_greeting() {
        let c = Character::new("Bran", "Human", "Fighter", "Soldier");
        let reply = ChatEngine.respond_with_rng(&c, "Play me a song", &mut rng());
        assert!(lines_for(class_lines("Fighter"), Topic::Greeting).contains(&reply.as_str()));
    }

    #[test]
    fn test_unknown_class_uses_general_lines() {
        let c = Character::new("Zed", "Human", "Artificer", "Sage");
        let reply = ChatEngine.respond_with_rng(&c, "bye", &mut rng());
        assert!(general_lines(Topic::Farewell).contains(&reply.as_str()));
    }

    #[test]
    fn test_contextual_story_excerpt() {
        let mut c = Character::new("Bran", "Human", "Fighter", "Soldier");
        c.background_story = "x".repeat(150);
        let reply = ChatEngine.respond(&c, "Tell me about your past");
        assert!(reply.contains(&format!("{}...", "x".repeat(100))));
        assert!(!reply.contains(&"x".repeat(101)));

        c.background_story = "Raised by wolves.".to_string();
        let reply = ChatEngine.respond(&c, "What is your story?");
        assert!(reply.contains("Raised by wolves."));
    }

    #[test]
    fn test_contextual_goals_and_ideals() {
        let mut c = Character::new("Bran", "Human", "Fighter", "Soldier");
        c.long_term_goals = "to rebuild my village".to_string();
        let reply = ChatEngine.respond(&c, "What are your goals?");
        assert!(reply.contains("to rebuild my village"));

        c.short_term_goals = "find the map".to_string();
        let reply = ChatEngine.respond(&c, "What are your goals?");
        assert!(reply.contains("find the map"));

        let reply = ChatEngine.respond(&c, "What are your ideals?");
        assert_eq!(reply, "I have my own beliefs about right and wrong.");
    }

    #[test]
    fn test_contextual_strength_for_unknown_class() {
        let mut c = Character::new("Zed", "Human", "Artificer", "Sage");
        c.attributes = Some(AbilityScores::new(16, 10, 10, 10, 10, 10));
        // "strong" is not a power keyword, so it reaches the sheet
        let reply = ChatEngine.respond(&c, "Are you strong?");
        assert!(reply.starts_with("My strength is my greatest pride"));
    }

    #[test]
    fn test_default_contextual_reply() {
        let mut c = Character::new("Lia", "Elf", "Wizard", "Sage");
        c.personality_tags = vec!["curious".to_string(), "kind".to_string(), "bold".to_string()];
        let reply = ChatEngine.respond(&c, "What do you think of the weather?");
        assert_eq!(
            reply,
            "As an Elf Wizard, I have a unique perspective on things. I am curious, kind by nature. What would you like to know?"
        );
    }

    #[test]
    fn test_suggested_questions_are_distinct() {
        let questions = ChatEngine.suggested_questions_with_rng(&mut rng());
        assert_eq!(questions.len(), SUGGESTED_QUESTION_COUNT);
        let unique: HashSet<_> = questions.iter().collect();
        assert_eq!(unique.len(), SUGGESTED_QUESTION_COUNT);
    }

    #[test]
    fn test_chat_records_history() {
        let mut c = Character::new("Bran", "Human", "Fighter", "Soldier");
        let reply = ChatEngine::new().chat(&mut c, "hello");
        assert_eq!(c.chat_history.len(), 1);
        assert_eq!(c.chat_history[0].user, "hello");
        assert_eq!(c.chat_history[0].character, reply);
    }
}
