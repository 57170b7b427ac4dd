use crate::assistant::intent::IntentTopic;
use crate::assistant::service::ServiceId;

/// Shown when the reply pipeline itself faults. The real error goes to
/// the diagnostics log, never to the user.
pub const APOLOGY: &str =
    "I apologize, but I encountered an error processing your request. Please try again.";

pub fn gating_message(missing: &[ServiceId]) -> String {
    let names: Vec<&str> = missing.iter().map(|service| service.token()).collect();
    format!(
        "To help you with this request, I need access to: {}. \
         Please connect these services first by clicking on them in the sidebar.",
        names.join(", ")
    )
}

pub fn connect_confirmation(service: ServiceId) -> String {
    let token = service.token();
    format!("Successfully connected {token}! You can now use {token}-related features.")
}

/// Static reply per topic. No interpolation from user input anywhere.
pub fn canned_response(topic: IntentTopic) -> &'static str {
    match topic {
        IntentTopic::Email => {
            "I can help you with email management. Here's what I can do:\n\n\
             • **Read emails**: \"Show me my latest emails\" or \"Check unread messages\"\n\
             • **Send emails**: \"Send an email to john@example.com about the meeting\"\n\
             • **Search**: \"Find emails from Sarah about the project\"\n\
             • **Organize**: \"Archive all promotional emails\"\n\n\
             To enable this, connect your Gmail account in the sidebar."
        }
        IntentTopic::Calendar => {
            "I can manage your calendar efficiently:\n\n\
             • **View schedule**: \"What's on my calendar today?\"\n\
             • **Create events**: \"Schedule a meeting with the team tomorrow at 2pm\"\n\
             • **Check availability**: \"Am I free on Friday afternoon?\"\n\
             • **Update events**: \"Move my 3pm meeting to 4pm\"\n\n\
             Connect your Google Calendar to get started."
        }
        IntentTopic::GitHub => {
            "I can help with GitHub operations:\n\n\
             • **Repository management**: \"List my repositories\" or \"Create a new repo\"\n\
             • **Code review**: \"Show open pull requests\" or \"Review PR #123\"\n\
             • **Issues**: \"Create an issue in my-project\" or \"List open issues\"\n\
             • **Commits**: \"Show recent commits\" or \"Commit these changes\"\n\n\
             Connect your GitHub account to enable these features."
        }
        IntentTopic::Drive => {
            "I can manage your Google Drive:\n\n\
             • **Search files**: \"Find my presentation about Q4 results\"\n\
             • **Organize**: \"Create a folder for project documents\"\n\
             • **Share**: \"Share the budget spreadsheet with team@company.com\"\n\
             • **Upload**: \"Upload this file to my Drive\"\n\n\
             Connect Google Drive to access your files."
        }
        IntentTopic::Twitter => {
            "I can handle Twitter operations:\n\n\
             • **Post tweets**: \"Tweet about our new product launch\"\n\
             • **Read timeline**: \"Show my Twitter feed\"\n\
             • **Engage**: \"Like and retweet posts about AI\"\n\
             • **Search**: \"Find tweets mentioning our company\"\n\n\
             Connect your Twitter account to get started."
        }
        IntentTopic::Maps => {
            "I can help with location services:\n\n\
             • **Find places**: \"Find coffee shops near me\"\n\
             • **Get directions**: \"How do I get to Central Park?\"\n\
             • **Explore**: \"Show me restaurants in downtown\"\n\
             • **Navigate**: \"What's the fastest route to the airport?\"\n\n\
             Google Maps integration is ready to use."
        }
        IntentTopic::None => {
            "I'm Celesta, your agentic AI assistant. I can help you with:\n\n\
             📧 **Email** - Manage Gmail, send and read messages\n\
             📁 **Files** - Organize Google Drive documents\n\
             📅 **Calendar** - Schedule meetings and events\n\
             ⚡ **GitHub** - Manage code repositories\n\
             𝕏 **Twitter** - Post and engage on social media\n\
             🗺️ **Maps** - Find locations and directions\n\n\
             What would you like to do?"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{canned_response, connect_confirmation, gating_message};
    use crate::assistant::intent::IntentTopic;
    use crate::assistant::service::ServiceId;

    #[test]
    fn gating_message_lists_services_in_order() {
        let message = gating_message(&[ServiceId::Gmail, ServiceId::Calendar]);
        assert!(message.contains("gmail, calendar"));
        assert!(message.contains("connect these services first"));
    }

    #[test]
    fn every_topic_has_a_distinct_reply() {
        let topics = [
            IntentTopic::Email,
            IntentTopic::Calendar,
            IntentTopic::GitHub,
            IntentTopic::Drive,
            IntentTopic::Twitter,
            IntentTopic::Maps,
            IntentTopic::None,
        ];
        for (i, a) in topics.iter().enumerate() {
            for b in &topics[i + 1..] {
                assert_ne!(canned_response(*a), canned_response(*b));
            }
        }
    }

    #[test]
    fn connect_confirmation_names_the_service() {
        let message = connect_confirmation(ServiceId::GitHub);
        assert!(message.contains("Successfully connected github"));
    }
}
