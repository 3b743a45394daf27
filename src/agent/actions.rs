//! The fixed vocabulary of browser automation actions the model is instructed
//! to emit. Rendered once into the system prompt per agent construction;
//! enforcement of the vocabulary is entirely the model's responsibility.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Number,
    String,
}

impl ArgKind {
    fn label(self) -> &'static str {
        match self {
            ArgKind::Number => "number",
            ArgKind::String => "string",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ActionArg {
    pub name: &'static str,
    pub kind: ArgKind,
}

#[derive(Debug, Clone, Copy)]
pub struct ActionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub args: &'static [ActionArg],
}

pub const AVAILABLE_ACTIONS: &[ActionSpec] = &[
    ActionSpec {
        name: "click",
        description: "Clicks on an element",
        args: &[ActionArg {
            name: "elementId",
            kind: ArgKind::Number,
        }],
    },
    ActionSpec {
        name: "setValue",
        description: "Focuses on and sets the value of an input element",
        args: &[
            ActionArg {
                name: "elementId",
                kind: ArgKind::Number,
            },
            ActionArg {
                name: "value",
                kind: ArgKind::String,
            },
        ],
    },
    ActionSpec {
        name: "navigate",
        description: "Navigates to a specified URL",
        args: &[ActionArg {
            name: "url",
            kind: ArgKind::String,
        }],
    },
    ActionSpec {
        name: "waiting",
        description: "Waits for a specified number of seconds before continuing to the next action. Useful for waiting for page loads, animations, or dynamic content to appear.",
        args: &[ActionArg {
            name: "seconds",
            kind: ArgKind::Number,
        }],
    },
    ActionSpec {
        name: "finish",
        description: "Indicates the task is finished",
        args: &[],
    },
    ActionSpec {
        name: "fail",
        description: "Indicates that you are unable to complete the task",
        args: &[ActionArg {
            name: "message",
            kind: ArgKind::String,
        }],
    },
    ActionSpec {
        name: "respond",
        description: "Provides page summaries, text responses, or asks questions to the user, this action will mean the task will end and you can continue with the next step",
        args: &[ActionArg {
            name: "message",
            kind: ArgKind::String,
        }],
    },
    ActionSpec {
        name: "memory",
        description: "Stores information, drafts, or notes for later use without stopping the interaction loop. Useful for drafting content, saving research findings, or storing intermediate results to reference in subsequent steps",
        args: &[ActionArg {
            name: "message",
            kind: ArgKind::String,
        }],
    },
];

/// Human-readable catalog listing, one action per line, interpolated into the
/// instruction template.
pub fn render_actions() -> String {
    AVAILABLE_ACTIONS
        .iter()
        .map(|action| {
            let args = action
                .args
                .iter()
                .map(|arg| format!("{}: {}", arg.name, arg.kind.label()))
                .collect::<Vec<_>>()
                .join(", ");
            format!("- {}({}): {}", action.name, args, action.description)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_exactly_eight_actions() {
        assert_eq!(AVAILABLE_ACTIONS.len(), 8);
        let names: Vec<&str> = AVAILABLE_ACTIONS.iter().map(|a| a.name).collect();
        assert_eq!(
            names,
            [
                "click", "setValue", "navigate", "waiting", "finish", "fail", "respond", "memory"
            ]
        );
    }

    #[test]
    fn rendering_includes_typed_arguments() {
        let rendered = render_actions();
        assert!(rendered.contains("- click(elementId: number): Clicks on an element"));
        assert!(rendered.contains("- setValue(elementId: number, value: string)"));
        assert!(rendered.contains("- finish(): Indicates the task is finished"));
        assert_eq!(rendered.lines().count(), AVAILABLE_ACTIONS.len());
    }
}
