use crate::models::{GenerationOutcome, Intent, OutboundMessage};
use crate::templates::{
    claim_quick_replies, package_card, quick_reply_menu, CLAIM_PROMPT_TEXT, GREETING_TEXT,
    PACKAGE_FOLLOW_UP_TEXT, PACKAGE_INTRO_TEXT,
};

pub fn compose_static_reply(intent: Intent) -> Option<Vec<OutboundMessage>> {
    match intent {
        Intent::ViewPackages => Some(package_reply()),
        Intent::StartClaim => Some(claim_reply()),
        Intent::Greeting => Some(greeting_reply()),
        Intent::Fallback => None,
    }
}

pub fn package_reply() -> Vec<OutboundMessage> {
    vec![
        OutboundMessage::text(PACKAGE_INTRO_TEXT),
        package_card(),
        OutboundMessage::text_with_quick_reply(PACKAGE_FOLLOW_UP_TEXT, &quick_reply_menu()),
    ]
}

pub fn claim_reply() -> Vec<OutboundMessage> {
    let prompt = OutboundMessage::text_with_quick_reply(CLAIM_PROMPT_TEXT, &claim_quick_replies());
    vec![prompt]
}

pub fn greeting_reply() -> Vec<OutboundMessage> {
    let greeting = OutboundMessage::text_with_quick_reply(GREETING_TEXT, &quick_reply_menu());
    vec![greeting]
}

pub fn generated_reply(outcome: GenerationOutcome) -> Vec<OutboundMessage> {
    if outcome.is_generated() {
        let menu = quick_reply_menu();
        let answer = OutboundMessage::text_with_quick_reply(outcome.into_text(), &menu);
        vec![answer]
    } else {
        vec![OutboundMessage::text(outcome.into_text())]
    }
}
