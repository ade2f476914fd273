//! Story request and prompt construction

use serde::{Deserialize, Serialize};

pub const DEFAULT_WORD_COUNT: u32 = 100;

const USER_INPUT: &str = "{user_input}";

/// Instructional template wrapped around every topic
pub const STORY_TEMPLATE: &str = "\
Write a creative and engaging short story with the following requirements:
- Title: Create an interesting title
- Characters: Develop 2-3 main characters with distinct personalities
- Setting: Describe the time and place where the story occurs
- Plot: Include a clear beginning, middle with conflict, and satisfying resolution
- Theme: Convey a meaningful message or lesson
- Style: Use vivid descriptions and natural dialogue

Story topic: {user_input}";

const STYLE_INSTRUCTIONS: [&str; 4] =
[   "- Avoid clichés and overused tropes"
  , "- Show character emotions through actions and dialogue"
  , "- Maintain consistent pacing throughout the story"
  , "- End with a satisfying conclusion that ties up main plot points"
];

/// One story to generate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest
{   /// Topic as given by the caller, before templating
    pub raw_prompt: String
  , /// Approximate story length, at least 1
    pub word_count: u32
  , /// Optional genre; empty counts as absent
    pub genre: Option<String>
}

impl GenerationRequest
{   /// An empty prompt falls back to the template text itself
    pub fn new(raw_prompt: impl Into<String>) -> Self
    {   let raw_prompt = raw_prompt.into();
        let raw_prompt = if raw_prompt.is_empty()
        {   STORY_TEMPLATE.to_string()
        } else
        {   raw_prompt
        };
        GenerationRequest
        {   raw_prompt
          , word_count: DEFAULT_WORD_COUNT
          , genre: None
        }
    }

    pub fn with_word_count(mut self, word_count: u32) -> Self
    {   self.word_count = word_count.max(1);
        self
    }

    pub fn with_genre(mut self, genre: Option<String>) -> Self
    {   self.genre = genre.filter(|g| !g.is_empty());
        self
    }

    /// Template plus genre directives. Word count and style
    /// directives are only added alongside a genre.
    pub fn full_prompt(&self) -> String
    {   let mut prompt
          = STORY_TEMPLATE.replacen(USER_INPUT, &self.raw_prompt, 1);

        if let Some(genre) = self.genre.as_deref()
          .filter(|g| !g.is_empty())
        {   prompt.push_str(&format!(
              "\nGenre: {} (ensure the story follows genre conventions)",
              capitalize(genre)
            ));
            prompt.push_str(&format!(
              "\nWord count: Approximately {} words\n\
               \nAdditional instructions:\n",
              self.word_count
            ));
            prompt.push_str(&STYLE_INSTRUCTIONS.join("\n"));
        }

        prompt
    }
}

impl Default for GenerationRequest
{   fn default() -> Self
    {   GenerationRequest::new(String::new())
    }
}

/// First character upper-cased, the rest lower-cased
fn capitalize(s: &str) -> String
{   let mut chars = s.chars();
    match chars.next()
    {   Some(first) => first
          .to_uppercase()
          .chain(chars.flat_map(char::to_lowercase))
          .collect()
      , None => String::new()
    }
}
