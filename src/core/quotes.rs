//! Lines shown in place of an empty document.

pub const QUOTES: &[&str] = &[
    "Start writing, no matter what. The water does not flow until the faucet is turned on.",
    "You can't use up creativity. The more you use, the more you have.",
    "There is no greater agony than bearing an untold story inside you.",
    "Write what should not be forgotten.",
    "The first draft is just you telling yourself the story.",
    "You can always edit a bad page. You can't edit a blank page.",
    "Fill your paper with the breathings of your heart.",
    "One word after another.",
    "Don't get it right, get it written.",
    "Begin anywhere.",
];

/// The quote for `seed`, stable for a given seed
pub fn pick(seed: u64) -> &'static str {
    QUOTES[(seed % QUOTES.len() as u64) as usize]
}
