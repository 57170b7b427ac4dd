use crate::assistant::service::ServiceId;

/// Topic that drives which canned reply the resolver picks. Derived per
/// input, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentTopic {
    Email,
    Calendar,
    GitHub,
    Drive,
    Twitter,
    Maps,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub topic: IntentTopic,
    /// Services the request needs, in priority order. Every matching
    /// keyword group contributes, not just the one that won the topic.
    pub required: Vec<ServiceId>,
}

/// Keyword groups in priority order. The first group with a hit decides
/// the topic; all groups with hits decide the required services.
const KEYWORD_GROUPS: [(IntentTopic, ServiceId, &[&str]); 6] = [
    (IntentTopic::Email, ServiceId::Gmail, &["email", "gmail"]),
    (
        IntentTopic::Calendar,
        ServiceId::Calendar,
        &["calendar", "schedule", "meeting"],
    ),
    (
        IntentTopic::GitHub,
        ServiceId::GitHub,
        &["github", "repo", "code"],
    ),
    (
        IntentTopic::Drive,
        ServiceId::Drive,
        &["drive", "file", "document"],
    ),
    (IntentTopic::Twitter, ServiceId::Twitter, &["twitter", "tweet"]),
    (
        IntentTopic::Maps,
        ServiceId::Maps,
        // "near me" keeps place-search phrasing like "coffee shops near
        // me" on the maps path even without the word "map".
        &["map", "location", "direction", "near me"],
    ),
];

/// Case-insensitive substring matching, no tokenization or stemming.
/// Callers must not pass empty or whitespace-only input; the composer
/// filters that out before anything reaches the pipeline.
pub fn classify(text: &str) -> Classification {
    let lowered = text.to_lowercase();
    let mut topic = IntentTopic::None;
    let mut required = Vec::new();

    for (group_topic, service, keywords) in KEYWORD_GROUPS {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            if topic == IntentTopic::None {
                topic = group_topic;
            }
            required.push(service);
        }
    }

    Classification { topic, required }
}

#[cfg(test)]
mod tests {
    use super::{classify, IntentTopic};
    use crate::assistant::service::ServiceId;

    #[test]
    fn unknown_text_yields_no_topic_and_no_services() {
        let classification = classify("hello there, how are you?");
        assert_eq!(classification.topic, IntentTopic::None);
        assert!(classification.required.is_empty());
    }

    #[test]
    fn calendar_phrasing_maps_to_calendar() {
        let classification = classify("What's on my calendar today?");
        assert_eq!(classification.topic, IntentTopic::Calendar);
        assert_eq!(classification.required, vec![ServiceId::Calendar]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let classification = classify("CHECK MY GMAIL");
        assert_eq!(classification.topic, IntentTopic::Email);
        assert_eq!(classification.required, vec![ServiceId::Gmail]);
    }

    #[test]
    fn first_group_in_priority_order_wins_the_topic() {
        // "code" belongs to the github group, which outranks drive.
        let classification = classify("review the code in that document");
        assert_eq!(classification.topic, IntentTopic::GitHub);
    }

    #[test]
    fn every_matching_group_contributes_a_required_service() {
        let classification = classify("email me the calendar for the meeting");
        assert_eq!(classification.topic, IntentTopic::Email);
        assert_eq!(
            classification.required,
            vec![ServiceId::Gmail, ServiceId::Calendar]
        );
    }

    #[test]
    fn place_search_phrasing_counts_as_maps() {
        let classification = classify("Find coffee shops near me");
        assert_eq!(classification.topic, IntentTopic::Maps);
        assert_eq!(classification.required, vec![ServiceId::Maps]);
    }
}
