use crate::conversation::Sender;
use serde_json::Value;

pub const INTENT_OPTIONS: &[&str] = &[
    "Order Status",
    "Cancel Order",
    "Return/Refund",
    "Product Inquiry",
    "Technical Support",
    "Complaint",
    "Feedback",
    "Account/Billing",
    "Shipping",
    "Shipping/Delivery",
    "Other",
];

pub const TOPIC_OPTIONS: &[&str] = &[
    "Orders",
    "Payments",
    "Shipping/Delivery",
    "Shipping",
    "Returns",
    "Refunds",
    "Warranty",
    "Product Info",
    "Account",
    "Technical",
    "General",
];

pub const SENTIMENT_OPTIONS: &[&str] = &["Positive", "Neutral", "Negative"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExemplarOutput {
    pub categorization: &'static str,
    pub intent: &'static str,
    pub topic: &'static str,
    pub sentiment: &'static str,
}

impl ExemplarOutput {
    /// Compact JSON with keys in schema order.
    pub fn to_json(&self) -> String {
        format!(
            "{{\"categorization\":{},\"intent\":{},\"topic\":{},\"sentiment\":{}}}",
            quoted(self.categorization),
            quoted(self.intent),
            quoted(self.topic),
            quoted(self.sentiment),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exemplar {
    pub transcript: &'static [(Sender, &'static str)],
    pub output: ExemplarOutput,
}

impl Exemplar {
    pub fn render_transcript(&self) -> String {
        self.transcript
            .iter()
            .map(|(sender, text)| format!("{}: {text}", sender.display_label()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub const EXEMPLARS: [Exemplar; 4] = [
    Exemplar {
        transcript: &[
            (Sender::Customer, "I want to cancel my subscription."),
            (Sender::Agent, "I can help you with that."),
        ],
        output: ExemplarOutput {
            categorization: "Request to cancel subscription",
            intent: "Cancel Order",
            topic: "Account/Billing",
            sentiment: "Neutral",
        },
    },
    Exemplar {
        transcript: &[
            (Sender::Customer, "My internet is down since morning."),
            (Sender::Agent, "Let me check your connection status."),
        ],
        output: ExemplarOutput {
            categorization: "Internet connectivity issue",
            intent: "Technical Support",
            topic: "Technical",
            sentiment: "Negative",
        },
    },
    Exemplar {
        transcript: &[
            (Sender::Customer, "Where is my order?"),
            (Sender::Agent, "Let me check for you."),
        ],
        output: ExemplarOutput {
            categorization: "Requesting shipping status",
            intent: "Order Status",
            topic: "Shipping/Delivery",
            sentiment: "Neutral",
        },
    },
    Exemplar {
        transcript: &[
            (Sender::Customer, "I received a damaged product."),
            (
                Sender::Agent,
                "I'm sorry to hear that. Would you like a replacement or refund?",
            ),
        ],
        output: ExemplarOutput {
            categorization: "Product received damaged",
            intent: "Return/Refund",
            topic: "Returns",
            sentiment: "Negative",
        },
    },
];

fn quoted(raw: &str) -> String {
    Value::String(raw.to_string()).to_string()
}

pub(crate) fn render_options(options: &[&str]) -> String {
    let quoted = options.iter().map(|option| quoted(option)).collect::<Vec<_>>();
    format!("[{}]", quoted.join(", "))
}
