//! Level-specific instructions shared by every prompt builder.

use crate::learning::level::Level;

pub const TUTOR_SYSTEM: &str = "You are an experienced English teacher who adapts real news articles for language learners. When asked for JSON, reply with JSON only.";

/// How generated text should read at each level.
#[derive(Debug, Clone, Copy)]
pub struct Guidance {
    pub style: &'static str,
    pub vocabulary: &'static str,
    pub grammar: &'static str,
}

pub fn guidance(level: Level) -> Guidance {
    match level {
        Level::Beginner => Guidance {
            style: "Use short sentences of 8 to 12 words and explain any idea that needs background knowledge.",
            vocabulary: "Choose common, concrete words a learner meets in the first two years of study.",
            grammar: "Focus on simple present, simple past and basic question forms.",
        },
        Level::Intermediate => Guidance {
            style: "Use clear sentences of moderate length with some linking words such as however and therefore.",
            vocabulary: "Include topic vocabulary that is useful beyond this article, with one or two less common words.",
            grammar: "Focus on present perfect, passive voice, conditionals and relative clauses.",
        },
        Level::Advanced => Guidance {
            style: "Write in a natural, nuanced register with complex sentences where they help precision.",
            vocabulary: "Include academic and idiomatic vocabulary, collocations and words with subtle connotations.",
            grammar: "Focus on subjunctive mood, inversion, cleft sentences and complex noun phrases.",
        },
    }
}

/// Bullet block describing the learner, used at the top of task prompts.
pub fn learner_brief(level: Level) -> String {
    let g = guidance(level);
    format!(
        "Learner level: {level} (CEFR {cefr}).\n- {style}\n- {vocabulary}\n- {grammar}",
        cefr = level.cefr(),
        style = g.style,
        vocabulary = g.vocabulary,
        grammar = g.grammar,
    )
}
