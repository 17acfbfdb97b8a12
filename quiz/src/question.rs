//! Question types and generated question specs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, Field};
use crate::i18n::{Language, Messages};

/// Group a question type is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Asks about or from a voice actor.
    Voice,
    /// Maps between civilian and transformed names.
    Identity,
    /// Parents and birthdays.
    Extra,
}

impl Category {
    /// Returns `true` for the extra category.
    #[must_use]
    pub const fn is_extra(self) -> bool {
        matches!(self, Self::Extra)
    }
}

/// The kind of question: which field is shown and which field is asked for.
///
/// The discriminant is the type code carried in share tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum QuestionType {
    TransformedToCivilian = 1,
    TransformedToVoice = 2,
    CivilianToTransformed = 3,
    CivilianToVoice = 4,
    VoiceToTransformed = 5,
    VoiceToCivilian = 6,
    CivilianToFather = 7,
    CivilianToMother = 8,
    CivilianToBirthday = 9,
    TransformedToBirthday = 10,
}

impl QuestionType {
    /// Types used for voice questions.
    pub const VOICE: [Self; 4] = [
        Self::TransformedToVoice,
        Self::CivilianToVoice,
        Self::VoiceToTransformed,
        Self::VoiceToCivilian,
    ];

    /// Types used for identity questions.
    pub const IDENTITY: [Self; 2] = [Self::TransformedToCivilian, Self::CivilianToTransformed];

    /// Returns the wire code (1..=10).
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Maps a wire code back to a type.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::TransformedToCivilian),
            2 => Some(Self::TransformedToVoice),
            3 => Some(Self::CivilianToTransformed),
            4 => Some(Self::CivilianToVoice),
            5 => Some(Self::VoiceToTransformed),
            6 => Some(Self::VoiceToCivilian),
            7 => Some(Self::CivilianToFather),
            8 => Some(Self::CivilianToMother),
            9 => Some(Self::CivilianToBirthday),
            10 => Some(Self::TransformedToBirthday),
            _ => None,
        }
    }

    /// Field shown in the prompt.
    #[must_use]
    pub const fn prompt_field(self) -> Field {
        match self {
            Self::TransformedToCivilian | Self::TransformedToVoice | Self::TransformedToBirthday => {
                Field::Transformed
            }
            Self::CivilianToTransformed
            | Self::CivilianToVoice
            | Self::CivilianToFather
            | Self::CivilianToMother
            | Self::CivilianToBirthday => Field::Civilian,
            Self::VoiceToTransformed | Self::VoiceToCivilian => Field::Voice,
        }
    }

    /// Field the choices are drawn from.
    #[must_use]
    pub const fn answer_field(self) -> Field {
        match self {
            Self::TransformedToCivilian | Self::VoiceToCivilian => Field::Civilian,
            Self::TransformedToVoice | Self::CivilianToVoice => Field::Voice,
            Self::CivilianToTransformed | Self::VoiceToTransformed => Field::Transformed,
            Self::CivilianToFather => Field::Father,
            Self::CivilianToMother => Field::Mother,
            Self::CivilianToBirthday | Self::TransformedToBirthday => Field::Birthday,
        }
    }

    /// Message key of the prompt template. Templates take `{{name}}`.
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::TransformedToCivilian => "q_cure_transform_who",
            Self::TransformedToVoice => "q_cure_actor_who",
            Self::CivilianToTransformed => "q_transform_who",
            Self::CivilianToVoice => "q_civilian_actor_who",
            Self::VoiceToTransformed | Self::VoiceToCivilian => "q_actor_who",
            Self::CivilianToFather => "q_civilian_father_who",
            Self::CivilianToMother => "q_civilian_mother_who",
            Self::CivilianToBirthday => "q_civilian_birthday_when",
            Self::TransformedToBirthday => "q_cure_birthday_when",
        }
    }

    /// Group this type belongs to.
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::TransformedToVoice
            | Self::CivilianToVoice
            | Self::VoiceToTransformed
            | Self::VoiceToCivilian => Category::Voice,
            Self::TransformedToCivilian | Self::CivilianToTransformed => Category::Identity,
            Self::CivilianToFather
            | Self::CivilianToMother
            | Self::CivilianToBirthday
            | Self::TransformedToBirthday => Category::Extra,
        }
    }

    /// Renders the prompt for the entry at `index`.
    #[must_use]
    pub fn prompt(
        self,
        dataset: &Dataset,
        messages: &Messages,
        language: Language,
        index: usize,
    ) -> String {
        let name = dataset.value(index, self.prompt_field(), language);
        messages.t(self.message_key(), &[("name", name)])
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({} -> {})",
            self.code(),
            self.prompt_field(),
            self.answer_field()
        )
    }
}

/// A generated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionSpec {
    /// Question kind.
    pub question_type: QuestionType,
    /// Dataset position of the subject.
    pub source_index: usize,
    /// Rendered prompt in the current language.
    pub prompt: String,
    /// Correct answer in the current language.
    pub correct_answer: String,
    /// Choices in display order; exactly one equals `correct_answer`.
    pub choices: Vec<String>,
    /// For each choice, the first entry whose answer field resolves to it.
    pub choice_indices: Vec<Option<usize>>,
    /// `true` for the weighted extra question.
    pub is_extra: bool,
}

impl QuestionSpec {
    /// Builds a question for `source_index`, resolving texts in `language`.
    #[must_use]
    pub fn new(
        dataset: &Dataset,
        messages: &Messages,
        language: Language,
        question_type: QuestionType,
        source_index: usize,
        choices: Vec<String>,
    ) -> Self {
        let answer_field = question_type.answer_field();
        let choice_indices = choices
            .iter()
            .map(|choice| dataset.find_index(answer_field, choice, language))
            .collect();
        Self {
            question_type,
            source_index,
            prompt: question_type.prompt(dataset, messages, language, source_index),
            correct_answer: dataset
                .value(source_index, answer_field, language)
                .to_string(),
            choices,
            choice_indices,
            is_extra: question_type.category() == Category::Extra,
        }
    }

    /// Re-resolves the prompt, correct answer and choices in `language`.
    ///
    /// Choices whose entry could not be resolved keep their text.
    pub fn relocalize(&mut self, dataset: &Dataset, messages: &Messages, language: Language) {
        let answer_field = self.question_type.answer_field();
        self.prompt = self
            .question_type
            .prompt(dataset, messages, language, self.source_index);
        self.correct_answer = dataset
            .value(self.source_index, answer_field, language)
            .to_string();
        for (choice, index) in self.choices.iter_mut().zip(&self.choice_indices) {
            if let Some(index) = index {
                *choice = dataset.value(*index, answer_field, language).to_string();
            }
        }
    }

    /// Returns the entry index behind `choice`, if it is one of the choices.
    #[must_use]
    pub fn choice_index(&self, choice: &str) -> Option<usize> {
        self.choices
            .iter()
            .position(|c| c == choice)
            .and_then(|pos| self.choice_indices.get(pos).copied().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{CharacterEntry, Localized};

    fn entry(civilian: (&str, &str), transformed: &str, voice: &str) -> CharacterEntry {
        let mut map = std::collections::BTreeMap::new();
        map.insert("ja".to_string(), civilian.0.to_string());
        map.insert("en".to_string(), civilian.1.to_string());
        CharacterEntry {
            civilian: Some(Localized::ByLanguage(map)),
            transformed: Some(transformed.into()),
            voice: Some(voice.into()),
            series: Some("S".into()),
            ..CharacterEntry::default()
        }
    }

    fn messages() -> Messages {
        Messages::from_pairs([
            ("q_cure_transform_who", "Who becomes {{name}}?"),
            ("q_transform_who", "What does {{name}} become?"),
        ])
    }

    #[test]
    fn type_table_matches_codes() {
        let expected = [
            (1, Field::Transformed, Field::Civilian),
            (2, Field::Transformed, Field::Voice),
            (3, Field::Civilian, Field::Transformed),
            (4, Field::Civilian, Field::Voice),
            (5, Field::Voice, Field::Transformed),
            (6, Field::Voice, Field::Civilian),
            (7, Field::Civilian, Field::Father),
            (8, Field::Civilian, Field::Mother),
            (9, Field::Civilian, Field::Birthday),
            (10, Field::Transformed, Field::Birthday),
        ];
        for (code, prompt, answer) in expected {
            let ty = QuestionType::from_code(code).unwrap();
            assert_eq!(ty.code(), code);
            assert_eq!(ty.prompt_field(), prompt, "type {code}");
            assert_eq!(ty.answer_field(), answer, "type {code}");
        }
        assert_eq!(QuestionType::from_code(0), None);
        assert_eq!(QuestionType::from_code(11), None);
    }

    #[test]
    fn categories() {
        assert!(QuestionType::VOICE
            .iter()
            .all(|ty| ty.category() == Category::Voice));
        assert!(QuestionType::IDENTITY
            .iter()
            .all(|ty| ty.category() == Category::Identity));
        assert_eq!(
            QuestionType::TransformedToBirthday.category(),
            Category::Extra
        );
    }

    #[test]
    fn voice_prompts_share_a_key() {
        assert_eq!(
            QuestionType::VoiceToTransformed.message_key(),
            QuestionType::VoiceToCivilian.message_key()
        );
    }

    #[test]
    fn new_resolves_choice_indices() {
        let dataset = Dataset::new(vec![
            entry(("ひかり", "Hikari"), "Cure Lumen", "A"),
            entry(("みお", "Mio"), "Cure Tide", "B"),
        ]);
        let question = QuestionSpec::new(
            &dataset,
            &messages(),
            Language::En,
            QuestionType::TransformedToCivilian,
            0,
            vec!["Mio".to_string(), "Hikari".to_string(), "Nobody".to_string()],
        );
        assert_eq!(question.prompt, "Who becomes Cure Lumen?");
        assert_eq!(question.correct_answer, "Hikari");
        assert_eq!(question.choice_indices, vec![Some(1), Some(0), None]);
        assert_eq!(question.choice_index("Mio"), Some(1));
        assert_eq!(question.choice_index("Nobody"), None);
        assert!(!question.is_extra);
    }

    #[test]
    fn relocalize_rewrites_resolved_choices() {
        let dataset = Dataset::new(vec![
            entry(("ひかり", "Hikari"), "Cure Lumen", "A"),
            entry(("みお", "Mio"), "Cure Tide", "B"),
        ]);
        let mut question = QuestionSpec::new(
            &dataset,
            &messages(),
            Language::En,
            QuestionType::TransformedToCivilian,
            0,
            vec!["Mio".to_string(), "Hikari".to_string(), "Nobody".to_string()],
        );
        question.relocalize(&dataset, &messages(), Language::Ja);
        assert_eq!(question.correct_answer, "ひかり");
        assert_eq!(question.choices, vec!["みお", "ひかり", "Nobody"]);
        assert_eq!(question.prompt, "Who becomes Cure Lumen?");
    }
}
