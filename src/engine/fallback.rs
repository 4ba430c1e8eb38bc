//! Pattern-matching chat responder.
//!
//! Stateless per call and intent-free: cleans the latest user message,
//! answers identity/meta questions, greets, scans an ordered knowledge
//! base first-match-wins, and otherwise picks from a fixed fallback pool.
//! It never reads or writes the richer conversation context.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;

use crate::models::{Message, Role};

const GREETINGS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "yo",
    "what's up",
    "greetings",
    "good morning",
    "good evening",
];

const GREETING_RESPONSES: &[&str] = &[
    "Hey! I'm Flico. What's on your mind?",
    "Hi there 🙂 How can I help you find a movie today?",
    "Hello! Let's talk movies.",
    "Hey! Ready to discover something new?",
];

const UNKNOWN_RESPONSES: &[&str] = &[
    "I'm not 100% sure about that specific detail, but I can help you find movies, compare streaming services, or suggest something based on your mood.",
    "That's a bit outside my movie knowledge, but ask me about genres, actors, or where to watch your favorite films!",
    "I'm still learning! Try asking me for a recommendation, or ask 'what's the cheapest streaming service?'",
    "I didn't quite catch that. Could you rephrase? I'm best at movie recommendations and streaming advice.",
];

/// One canned answer triggered by any of its keywords
struct KbEntry {
    keywords: &'static [&'static str],
    response: &'static str,
}

/// Ordered knowledge base; entry order is the matching priority.
static KNOWLEDGE_BASE: Lazy<Vec<KbEntry>> = Lazy::new(|| {
    vec![
        // Streaming services & pricing
        KbEntry {
            keywords: &["cheapest", "cost", "price", "streaming service", "subscription", "how much", "expensive"],
            response: "Here's a quick breakdown of major streaming services (prices may vary):\n\n\
                - **Apple TV+**: ~$9.99/mo (Best value for high-quality originals)\n\
                - **Amazon Prime Video**: Included with Prime ($14.99/mo) or ~$8.99/mo standalone\n\
                - **Disney+**: ~$7.99/mo (with ads) or ~$13.99/mo (no ads)\n\
                - **Netflix**: Starts at ~$6.99/mo (Standard with ads), up to ~$22.99/mo (Premium)\n\
                - **Hulu**: ~$7.99/mo (ads) or ~$17.99/mo (no ads)\n\
                - **Max (HBO)**: ~$9.99/mo (ads) or ~$16.99/mo (no ads)\n\n\
                If you're looking for the absolute cheapest, **Netflix Standard with Ads** or **Hulu (Ads)** are strong contenders, though **Apple TV+** offers great quality for a lower mid-tier price.",
        },
        KbEntry {
            keywords: &["netflix", "what is on netflix"],
            response: "Netflix is the giant of streaming. It has massive hits like 'Stranger Things', 'Squid Game', and 'The Crown'. It offers a huge library of movies, TV shows, and documentaries.",
        },
        KbEntry {
            keywords: &["disney", "disney plus", "disney+"],
            response: "Disney+ is the home of Disney, Pixar, Marvel, Star Wars, and National Geographic. If you love superheroes, animated classics, or The Mandalorian, this is the one for you.",
        },
        KbEntry {
            keywords: &["hbo", "max", "hbo max"],
            response: "Max (formerly HBO Max) is known for prestige TV. Think 'Game of Thrones', 'Succession', 'The Last of Us', plus the entire Warner Bros. movie library.",
        },
        KbEntry {
            keywords: &["prime", "amazon prime"],
            response: "Prime Video has great originals like 'The Boys' and 'Reacher', plus a massive library of movies to rent or buy. It's often included with your Amazon Prime shipping membership.",
        },
        KbEntry {
            keywords: &["apple", "apple tv"],
            response: "Apple TV+ focuses on quality over quantity. They have fewer shows, but they are high budget and star-studded. 'Ted Lasso', 'Severance', and 'Foundation' are must-watches.",
        },
        // Genres & recommendations
        KbEntry {
            keywords: &["recommend", "suggest", "movie", "watch", "looking for", "find me"],
            response: "I can definitely help with that! What kind of mood are you in? Or do you have a favorite genre?",
        },
        KbEntry {
            keywords: &["action", "thriller", "adventure", "explosion", "fight"],
            response: "Ooh, looking for some excitement? I'd recommend 'Mad Max: Fury Road', 'John Wick', 'Mission: Impossible', or 'Top Gun: Maverick'. High-octane stuff!",
        },
        KbEntry {
            keywords: &["comedy", "funny", "laugh", "humor", "hilarious"],
            response: "Need a laugh? 'Superbad', 'The Grand Budapest Hotel', 'Palm Springs', or 'Game Night' are great choices.",
        },
        KbEntry {
            keywords: &["drama", "sad", "emotional", "cry", "tearjerker"],
            response: "Sometimes a good cry helps. 'The Shawshank Redemption', 'Parasite', 'Aftersun', or 'Past Lives' might be what you need.",
        },
        KbEntry {
            keywords: &["sci-fi", "science fiction", "space", "future", "alien"],
            response: "Space... the final frontier. You can't go wrong with 'Interstellar', 'Dune', 'Blade Runner 2049', or 'Arrival'.",
        },
        KbEntry {
            keywords: &["horror", "scary", "spooky", "fear", "terrifying"],
            response: "Brave soul! 'Hereditary', 'The Shining', 'Talk to Me', or 'Barbarian' will keep you up at night.",
        },
        KbEntry {
            keywords: &["romance", "love", "date", "romantic"],
            response: "Feeling romantic? 'La La Land', 'Before Sunrise', 'About Time', or 'The Notebook' are perfect for that.",
        },
        KbEntry {
            keywords: &["family", "kid", "children", "animated", "cartoon"],
            response: "For a family movie night, I suggest 'Spider-Man: Into the Spider-Verse', 'Paddington 2', 'The Incredibles', or 'Coco'.",
        },
    ]
});

/// Produces a reply to the last user message in the history
pub fn fallback_reply(messages: &[Message]) -> String {
    let user_text = messages
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.text.as_str())
        .unwrap_or("");
    let clean = clean_text(user_text);

    // Identity & meta
    if clean.contains("your name") || clean.contains("who are you") {
        return "I don't have a human name, but I'm Flico — your AI assistant built to help you discover great movies.".to_string();
    }
    if clean.contains("how are you") {
        return "I'm doing well — focused and ready to help you find your next watch.".to_string();
    }
    if clean.contains("what can you do") {
        return "I can chat with you, remember context, explain ideas, and help you decide what to watch based on your mood.".to_string();
    }
    if clean.contains("why") {
        return "That's a good question. Usually, the reason depends on context. Can you be more specific?".to_string();
    }

    if is_greeting(&clean) {
        return random_choice(GREETING_RESPONSES);
    }

    if let Some(response) = find_pattern_response(&clean) {
        return response.to_string();
    }

    random_choice(UNKNOWN_RESPONSES)
}

/// Lowercases and strips everything but word characters and whitespace
fn clean_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect()
}

/// Greeting keyword plus a short message
fn is_greeting(clean: &str) -> bool {
    let word_count = clean.split_whitespace().count();
    GREETINGS.iter().any(|g| clean.contains(g)) && word_count < 5
}

/// First knowledge-base entry with any keyword present wins
fn find_pattern_response(clean: &str) -> Option<&'static str> {
    KNOWLEDGE_BASE
        .iter()
        .find(|entry| entry.keywords.iter().any(|k| clean.contains(k)))
        .map(|entry| entry.response)
}

fn random_choice(pool: &[&'static str]) -> String {
    pool.choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
        .to_string()
}
