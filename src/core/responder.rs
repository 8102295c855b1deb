//! # Simulated Responder
//!
//! Produces the assistant's reply locally: a mode-specific lead-in followed
//! by the user's text echoed verbatim. No network, no model.
//!
//! ```text
//! generate("Merhaba", Casual)  →  "Elbette, hemen bakalım! Merhaba"
//! ```
//!
//! The randomness source is injectable so tests can pin the lead-in choice.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::core::mode::ModeId;

const CASUAL_LEAD_INS: [&str; 3] = [
    "Anladım! Size yardımcı olayım.",
    "Elbette, hemen bakalım!",
    "Güzel soru! İşte cevabım:",
];

const FORMAL_LEAD_INS: [&str; 3] = [
    "Talebinizi aldım. Detaylı bilgi için:",
    "Sorununuzu anladım. Çözüm önerim:",
    "İlginiz için teşekkür ederim. Yanıtım:",
];

const TECHNICAL_LEAD_INS: [&str; 3] = [
    "Teknik açıdan bakıldığında:",
    "Detaylı analiz sonucu:",
    "Profesyonel değerlendirmem:",
];

/// The three fixed lead-ins for a mode.
pub fn lead_ins(mode: ModeId) -> &'static [&'static str; 3] {
    match mode {
        ModeId::Casual => &CASUAL_LEAD_INS,
        ModeId::Formal => &FORMAL_LEAD_INS,
        ModeId::Technical => &TECHNICAL_LEAD_INS,
    }
}

pub struct Responder {
    rng: Box<dyn RngCore + Send>,
}

impl Default for Responder {
    fn default() -> Self {
        Self::new()
    }
}

impl Responder {
    /// Entropy-seeded responder for normal runs.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create with a specific seed for reproducible replies
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self { rng: Box::new(rng) }
    }

    /// Builds a reply: uniformly chosen lead-in, one space, then `user_text` as-is.
    pub fn generate(&mut self, user_text: &str, mode: ModeId) -> String {
        let choices = lead_ins(mode);
        let lead_in = choices[self.rng.gen_range(0..choices.len())];
        format!("{} {}", lead_in, user_text)
    }
}
