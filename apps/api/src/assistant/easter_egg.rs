/// A hidden nickname that switches the assistant into vacation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EasterEgg {
    pub term: &'static str,
    /// French possessive matching the nickname's gender ("ma" / "mon").
    pub article: &'static str,
    pub special: bool,
}

const TERMS: &[EasterEgg] = &[
    EasterEgg { term: "poupouille", article: "ma", special: false },
    EasterEgg { term: "tchoupinoux", article: "mon", special: true },
    EasterEgg { term: "péchailloux", article: "mon", special: false },
    EasterEgg { term: "péchaille", article: "ma", special: false },
    EasterEgg { term: "chayoux", article: "mon", special: false },
    EasterEgg { term: "chnawax", article: "mon", special: false },
];

/// Shown ahead of the vacation-mode reply.
pub const NOTIFICATION: &str =
    "🎉 Easter egg found: You have unlocked the full potential of the assistant! 🎉";

/// First configured term contained in the message, case-insensitively.
pub fn detect(message: &str) -> Option<&'static EasterEgg> {
    let lowered = message.to_lowercase();
    TERMS.iter().find(|egg| lowered.contains(egg.term))
}

impl EasterEgg {
    pub fn greeting(&self) -> String {
        if self.special {
            format!(
                "Coucouuuuu {} {} du B15 !!!! Comment il va mon superbe tchoup' masqué ?? \
                 J'espère que tu as récupéré ton sticker qui te revient de droit.",
                self.article, self.term
            )
        } else {
            format!("Coucouuuuu {} {} !!!! Comment ça va par ici ??", self.article, self.term)
        }
    }
}
