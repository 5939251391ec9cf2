//! Interactive questions.
//!
//! [`Questions`] decides once per run whether the user can be asked anything:
//! the `interactive` feature must be compiled in, `--no-interaction` must be
//! absent, and stdin must be a terminal. When it cannot ask, every question
//! resolves to its default.

use std::io::{self, IsTerminal};

use gantry_core::{
    application::{ApplicationError, Prompter},
    domain::ChoiceOption,
    error::GantryResult,
};

/// Per-run question policy.
#[derive(Debug, Clone, Copy)]
pub struct Questions {
    interactive: bool,
}

impl Questions {
    pub fn detect(no_interaction: bool) -> Self {
        Self {
            interactive: cfg!(feature = "interactive")
                && !no_interaction
                && io::stdin().is_terminal(),
        }
    }

    pub fn non_interactive() -> Self {
        Self { interactive: false }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// The [`Prompter`] used for driver selection.
    pub fn prompter(&self) -> Box<dyn Prompter> {
        #[cfg(feature = "interactive")]
        {
            if self.interactive {
                return Box::new(dialoguer_prompt::DialoguerPrompter::new());
            }
        }
        Box::new(DefaultsPrompter)
    }

    /// Free-text question. Returns `default` when the user cannot be asked.
    pub fn input(&self, prompt: &str, default: Option<&str>) -> GantryResult<Option<String>> {
        #[cfg(feature = "interactive")]
        {
            if self.interactive {
                return dialoguer_prompt::input(prompt, default).map(Some);
            }
        }
        let _ = prompt;
        Ok(default.map(str::to_string))
    }

    /// Single choice outside driver selection (e.g. template flavour).
    pub fn choice(
        &self,
        prompt: &str,
        options: &[ChoiceOption],
        default: &str,
    ) -> GantryResult<String> {
        self.prompter().choice(prompt, options, default)
    }
}

/// [`Prompter`] that answers every question with its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn choice(
        &self,
        _prompt: &str,
        options: &[ChoiceOption],
        default: &str,
    ) -> GantryResult<String> {
        if options.iter().any(|o| o.value == default) {
            return Ok(default.to_string());
        }
        options
            .first()
            .map(|o| o.value.clone())
            .ok_or_else(no_options)
    }

    fn multi_select(
        &self,
        _prompt: &str,
        _options: &[ChoiceOption],
        defaults: &[String],
    ) -> GantryResult<Vec<String>> {
        Ok(defaults.to_vec())
    }
}

fn no_options() -> gantry_core::error::GantryError {
    ApplicationError::Interaction {
        reason: "no options to choose from".into(),
    }
    .into()
}

#[cfg(feature = "interactive")]
mod dialoguer_prompt {
    use dialoguer::{Input, MultiSelect, Select, theme::ColorfulTheme};

    use super::*;

    /// Terminal prompts rendered with `dialoguer`.
    pub struct DialoguerPrompter {
        theme: ColorfulTheme,
    }

    impl DialoguerPrompter {
        pub fn new() -> Self {
            Self {
                theme: ColorfulTheme::default(),
            }
        }
    }

    impl Prompter for DialoguerPrompter {
        fn choice(
            &self,
            prompt: &str,
            options: &[ChoiceOption],
            default: &str,
        ) -> GantryResult<String> {
            if options.is_empty() {
                return Err(no_options());
            }
            let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
            let default = options.iter().position(|o| o.value == default).unwrap_or(0);

            let index = Select::with_theme(&self.theme)
                .with_prompt(prompt)
                .items(&labels)
                .default(default)
                .interact()
                .map_err(interaction)?;

            Ok(options[index].value.clone())
        }

        fn multi_select(
            &self,
            prompt: &str,
            options: &[ChoiceOption],
            defaults: &[String],
        ) -> GantryResult<Vec<String>> {
            let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
            let checked: Vec<bool> = options
                .iter()
                .map(|o| defaults.iter().any(|d| *d == o.value))
                .collect();

            let picked = MultiSelect::with_theme(&self.theme)
                .with_prompt(prompt)
                .items(&labels)
                .defaults(&checked)
                .interact()
                .map_err(interaction)?;

            if picked.is_empty() {
                return Ok(defaults.to_vec());
            }
            Ok(picked
                .into_iter()
                .map(|i| options[i].value.clone())
                .collect())
        }
    }

    pub fn input(prompt: &str, default: Option<&str>) -> GantryResult<String> {
        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(interaction)
    }

    fn interaction(e: dialoguer::Error) -> gantry_core::error::GantryError {
        ApplicationError::Interaction {
            reason: e.to_string(),
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<ChoiceOption> {
        vec![
            ChoiceOption {
                label: "Memory".into(),
                value: "memory".into(),
            },
            ChoiceOption {
                label: "Redis".into(),
                value: "redis".into(),
            },
        ]
    }

    #[test]
    fn defaults_prompter_returns_default() {
        let choice = DefaultsPrompter
            .choice("Which cache driver?", &options(), "redis")
            .unwrap();
        assert_eq!(choice, "redis");
    }

    #[test]
    fn defaults_prompter_falls_back_to_first_option() {
        let choice = DefaultsPrompter.choice("?", &options(), "unknown").unwrap();
        assert_eq!(choice, "memory");
    }

    #[test]
    fn defaults_prompter_without_options_fails() {
        assert!(DefaultsPrompter.choice("?", &[], "x").is_err());
    }

    #[test]
    fn defaults_prompter_multi_returns_defaults() {
        let picked = DefaultsPrompter
            .multi_select("?", &options(), &["memory".to_string()])
            .unwrap();
        assert_eq!(picked, ["memory"]);
    }

    #[test]
    fn non_interactive_input_uses_default() {
        let questions = Questions::non_interactive();
        assert!(!questions.is_interactive());
        assert_eq!(
            questions.input("Namespace?", Some("skeleton")).unwrap().as_deref(),
            Some("skeleton")
        );
        assert_eq!(questions.input("Name?", None).unwrap(), None);
    }
}
