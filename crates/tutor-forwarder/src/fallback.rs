//! Canned answers used when no upstream model could respond
//!
//! Pure and deterministic: the same question always yields the same text,
//! and nothing here touches the network.

use std::sync::OnceLock;

use regex::Regex;

/// Rough intent of a question, used to choose a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// "How are you?"
    Wellbeing,
    /// "Hi", "Hello", "你好"
    Greeting,
    /// "What is ...", "Who is ...", "Explain ..."
    Definition,
    /// Anything else
    Unknown,
}

fn wellbeing() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\bhow\s+are\s+(you|u)\b|\bhow's\s+it\s+going\b|你好吗|最近怎么样|你怎么样")
            .expect("must be valid regex")
    })
}

fn greeting() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*(hi|hello|hey|good\s+(morning|afternoon|evening))\b|^\s*(你好|您好|嗨|哈喽)")
            .expect("must be valid regex")
    })
}

fn definition() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(what\s+is|what's|what\s+are|who\s+is|who's|who\s+was|explain|define)\b|什么是|是什么|谁是|解释")
            .expect("must be valid regex")
    })
}

/// Classify a question by keyword
pub fn classify(question: &str) -> Intent {
    if wellbeing().is_match(question) {
        Intent::Wellbeing
    } else if greeting().is_match(question) {
        Intent::Greeting
    } else if definition().is_match(question) {
        Intent::Definition
    } else {
        Intent::Unknown
    }
}

/// Synthesize the fallback answer for a question
pub fn answer(question: &str) -> String {
    match classify(question) {
        Intent::Wellbeing => {
            "I'm doing well, thanks for asking! I'm your study assistant. \
             The online tutor is taking a short break, but you can keep practicing \
             with flashcards and quizzes while it comes back."
                .to_owned()
        }
        Intent::Greeting => {
            "Hello! I'm your study assistant. Ask me about math, Chinese or English \
             and I'll do my best to help. The online tutor is busy right now, \
             so answers may be brief for a moment."
                .to_owned()
        }
        Intent::Definition => format!(
            "Good question: \"{question}\". I can't reach the online tutor right now, \
             so here's a way to work it out yourself: find the key term in your textbook \
             or glossary, write a one-sentence definition in your own words, then think of \
             one example. Ask me again in a minute for a fuller explanation."
        ),
        Intent::Unknown => format!(
            "Sorry, I couldn't reach the online tutor just now, so I can't answer \
             \"{question}\" yet. Please try again in a moment."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greetings_in_either_language() {
        assert_eq!(classify("Hello there"), Intent::Greeting);
        assert_eq!(classify("  HEY"), Intent::Greeting);
        assert_eq!(classify("good morning!"), Intent::Greeting);
        assert_eq!(classify("你好，老师"), Intent::Greeting);
    }

    #[test]
    fn wellbeing_beats_greeting() {
        assert_eq!(classify("Hi, how are you?"), Intent::Wellbeing);
        assert_eq!(classify("How ARE you today"), Intent::Wellbeing);
        assert_eq!(classify("你好吗？"), Intent::Wellbeing);
    }

    #[test]
    fn definition_questions() {
        assert_eq!(classify("What is a prime number?"), Intent::Definition);
        assert_eq!(classify("who is Li Bai"), Intent::Definition);
        assert_eq!(classify("Can you EXPLAIN the past perfect tense?"), Intent::Definition);
        assert_eq!(classify("什么是成语"), Intent::Definition);
    }

    #[test]
    fn greeting_words_inside_other_words_do_not_match() {
        assert_eq!(classify("this exercise is hard"), Intent::Unknown);
        assert_eq!(classify("Solve 3x + 5 = 20"), Intent::Unknown);
    }

    #[test]
    fn unknown_questions_are_echoed_verbatim() {
        let question = "Solve 3x + 5 = 20";
        let text = answer(question);
        assert!(text.starts_with("Sorry"));
        assert!(text.contains("\"Solve 3x + 5 = 20\""));
    }

    #[test]
    fn definition_answers_echo_the_question() {
        assert!(answer("What is a verb?").contains("\"What is a verb?\""));
    }

    #[test]
    fn answers_are_deterministic() {
        for question in ["hello", "how are you", "what is pi", "水的沸点", ""] {
            assert_eq!(answer(question), answer(question));
        }
    }
}
