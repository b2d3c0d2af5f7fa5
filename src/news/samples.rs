//! Built-in articles served when live news is off or unavailable.

use crate::{
    learning::{Level, cultural, summary},
    news::model::LearningArticle,
};

pub const CLIMATE_SUMMIT_TITLE: &str =
    "Climate Summit 2025: Global Leaders Agree on Renewable Energy Targets";

pub const CLIMATE_SUMMIT_CONTENT: &str = "World leaders gathered in Paris this week for the Climate Summit 2025, reaching a historic agreement on renewable energy targets. The summit, which brought together representatives from over 190 countries, focused on accelerating the transition to sustainable energy sources.

Key agreements include:
- Commitment to reduce carbon emissions by 50% by 2030
- Investment of $500 billion in renewable energy infrastructure
- Establishment of an international fund to support developing nations

\"Today marks a turning point in our fight against climate change,\" said the summit's chairperson. \"We have shown that when nations come together, we can achieve what once seemed impossible.\"

The agreement emphasizes the importance of solar and wind energy, with many countries committing to phase out fossil fuels entirely by 2040. Experts predict this will create millions of new jobs in the green energy sector.";

/// Study words for the climate summit article when no others are known.
pub const CLIMATE_SUMMIT_KEYWORDS: [&str; 5] = [
    "climate",
    "renewable energy",
    "sustainable",
    "emissions",
    "fossil fuels",
];

const AI_TITLE: &str = "Technology Advances in Artificial Intelligence";

const AI_CONTENT: &str = "Artificial intelligence continues to revolutionize various sectors, from healthcare to transportation. Recent developments have shown remarkable progress in machine learning capabilities.

Key developments include:
- Advanced language models that can understand context
- Improved image recognition systems
- Enhanced automation in manufacturing

Industry leaders emphasize the importance of ethical AI development and responsible innovation.";

const BEGINNER_CLIMATE_TITLE: &str = "People Meet to Help the Earth";

const BEGINNER_CLIMATE_CONTENT: &str = "Many countries met in Paris this week. They want to help the earth. They will use clean energy like sun and wind. This is good for everyone.

They will do three things:
- Use less bad air
- Put money in clean energy
- Help poor countries

The leader said: \"This is a good day. We can help the earth together.\"

Many countries will stop using old energy. They will use sun and wind instead. This will make new jobs for people.";

const BEGINNER_AI_TITLE: &str = "New Computers Help People";

const BEGINNER_AI_CONTENT: &str = "Computers are getting better every day. They help doctors find problems. They help cars drive safely. They help many people.

Computers can do three things:
- Understand what people say
- See pictures
- Help machines work

People say computers must be good. They must help people, not hurt people.";

struct Sample {
    title: &'static str,
    summary: &'static str,
    content: &'static str,
    keywords: &'static [&'static str],
}

fn samples_for(level: Level) -> [Sample; 2] {
    match level {
        Level::Beginner => [
            Sample {
                title: BEGINNER_CLIMATE_TITLE,
                summary: "Many countries met in Paris. They want to help the earth. They will use clean energy. This is good for everyone.",
                content: BEGINNER_CLIMATE_CONTENT,
                keywords: &["important", "people", "country", "change", "help"],
            },
            Sample {
                title: BEGINNER_AI_TITLE,
                summary: "Computers are getting better. They help doctors. They help cars. They help many people. This is good.",
                content: BEGINNER_AI_CONTENT,
                keywords: &["computer", "help", "people", "doctor", "car"],
            },
        ],
        Level::Intermediate => [
            Sample {
                title: CLIMATE_SUMMIT_TITLE,
                summary: "World leaders have reached a historic agreement on renewable energy targets at the Climate Summit 2025. The summit brought together representatives from over 190 countries to discuss sustainable energy solutions.",
                content: CLIMATE_SUMMIT_CONTENT,
                keywords: &["significant", "analysis", "strategy", "impact", "develop"],
            },
            Sample {
                title: AI_TITLE,
                summary: "Recent breakthroughs in AI technology are reshaping industries and daily life. Advanced language models and improved systems are transforming how we work and communicate.",
                content: AI_CONTENT,
                keywords: &[
                    "artificial intelligence",
                    "machine learning",
                    "automation",
                    "innovation",
                    "technology",
                ],
            },
        ],
        Level::Advanced => [
            Sample {
                title: CLIMATE_SUMMIT_TITLE,
                summary: "In an unprecedented display of international cooperation, world leaders convened at the Climate Summit 2025 in Paris, culminating in a comprehensive agreement on renewable energy targets that represents a paradigm shift in global environmental policy. The summit, which assembled representatives from over 190 nations, was characterized by substantive discussions on accelerating the transition to sustainable energy sources.",
                content: CLIMATE_SUMMIT_CONTENT,
                keywords: &["substantiate", "comprehensive", "facilitate", "paradigm", "nuanced"],
            },
            Sample {
                title: AI_TITLE,
                summary: "The landscape of artificial intelligence continues to undergo profound transformations, with recent breakthroughs fundamentally reshaping industries and daily life. Sophisticated language models and advanced recognition systems are revolutionizing how we interact with technology.",
                content: AI_CONTENT,
                keywords: &[
                    "sophisticated",
                    "profound",
                    "fundamentally",
                    "revolutionize",
                    "comprehensive",
                ],
            },
        ],
    }
}

/// Two articles per level with ids `"1"` and `"2"`.
pub fn sample_articles(level: Level) -> Vec<LearningArticle> {
    samples_for(level)
        .into_iter()
        .enumerate()
        .map(|(idx, sample)| LearningArticle {
            id: (idx + 1).to_string(),
            title: sample.title.to_string(),
            summary: sample.summary.to_string(),
            content: sample.content.to_string(),
            level,
            keywords: sample.keywords.iter().map(|k| k.to_string()).collect(),
            grammar_points: summary::default_grammar_points(level),
            cultural_context: cultural::fallback(sample.title, sample.content, level),
            source: Some("NELS".to_string()),
            author: None,
            url: None,
            published_at: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::{GateConfig, is_generic};

    #[test]
    fn every_level_has_two_articles() {
        for level in Level::ALL {
            let articles = sample_articles(level);
            assert_eq!(articles.len(), 2);
            assert_eq!(articles[0].id, "1");
            assert_eq!(articles[1].id, "2");
            assert!(articles.iter().all(|a| a.level == level));
        }
    }

    #[test]
    fn sample_context_is_specific() {
        for level in Level::ALL {
            for article in sample_articles(level) {
                assert!(
                    !is_generic(&article.cultural_context.description, &GateConfig::default()),
                    "{} at {level}",
                    article.title
                );
            }
        }
    }

    #[test]
    fn intermediate_lead_is_the_climate_summit() {
        let lead = &sample_articles(Level::Intermediate)[0];
        assert_eq!(lead.title, CLIMATE_SUMMIT_TITLE);
        assert_eq!(lead.cultural_context.title, "Climate Change and Environmental Policy");
    }
}
