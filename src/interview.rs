//! Scripted virtual interviewer.
//!
//! This is a canned flow, not a conversational agent: it walks a fixed
//! per-level question list, scores each candidate turn through the
//! `ResponseEvaluator`, falls back to generic follow-up prompts once the
//! script runs out, and averages the turn scores at the end.
//!
//! The script (interviewer profiles, question lists, templates) ships with
//! defaults and can be overridden per-field from the TOML config.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::evaluator::Evaluation;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InterviewerProfile {
    pub id: String,
    pub name: String,
    pub title: String,
    pub company: String,
}

/// Everything the interviewer says, organized by seniority level.
#[derive(Clone, Debug, Deserialize)]
pub struct InterviewScript {
    #[serde(default = "default_interviewers")]
    pub interviewers: Vec<InterviewerProfile>,
    #[serde(default = "default_junior_questions")]
    pub junior: Vec<String>,
    #[serde(default = "default_mid_questions")]
    pub mid: Vec<String>,
    #[serde(default = "default_senior_questions")]
    pub senior: Vec<String>,
    #[serde(default = "default_follow_ups")]
    pub follow_ups: Vec<String>,
    /// Placeholders: {name}, {title}, {company}.
    #[serde(default = "default_greeting_template")]
    pub greeting_template: String,
    /// Placeholder: {score}.
    #[serde(default = "default_closing_template")]
    pub closing_template: String,
}

impl Default for InterviewScript {
    fn default() -> Self {
        Self {
            interviewers: default_interviewers(),
            junior: default_junior_questions(),
            mid: default_mid_questions(),
            senior: default_senior_questions(),
            follow_ups: default_follow_ups(),
            greeting_template: default_greeting_template(),
            closing_template: default_closing_template(),
        }
    }
}

impl InterviewScript {
    pub fn interviewer(&self, id: &str) -> Option<&InterviewerProfile> {
        self.interviewers.iter().find(|p| p.id == id)
    }

    /// Question list for a level; `None` for levels the script doesn't know.
    pub fn questions(&self, level: &str) -> Option<&[String]> {
        match level {
            "junior" => Some(&self.junior),
            "mid" => Some(&self.mid),
            "senior" => Some(&self.senior),
            _ => None,
        }
    }
}

fn default_interviewers() -> Vec<InterviewerProfile> {
    vec![
        InterviewerProfile {
            id: "sarah".into(),
            name: "Sarah Chen".into(),
            title: "Senior Technical Recruiter".into(),
            company: "TechCorp".into(),
        },
        InterviewerProfile {
            id: "marcus".into(),
            name: "Marcus Rodriguez".into(),
            title: "Engineering Manager".into(),
            company: "InnovateLabs".into(),
        },
        InterviewerProfile {
            id: "aisha".into(),
            name: "Dr. Aisha Patel".into(),
            title: "VP of Engineering".into(),
            company: "Global Solutions".into(),
        },
    ]
}

fn default_junior_questions() -> Vec<String> {
    vec![
        "Tell me about yourself and why you're interested in this role.".into(),
        "Describe a challenging bug you fixed and how you approached it.".into(),
        "How do you handle feedback from senior developers?".into(),
        "Tell me about a time you had to learn a new technology quickly.".into(),
    ]
}

fn default_mid_questions() -> Vec<String> {
    vec![
        "Walk me through a project where you had to collaborate with multiple teams.".into(),
        "Describe a situation where you had to make a technical decision with incomplete information.".into(),
        "How do you approach mentoring junior developers?".into(),
        "Tell me about a time when you had to push back on a product requirement.".into(),
    ]
}

fn default_senior_questions() -> Vec<String> {
    vec![
        "How would you architect a system to handle 10x current traffic?".into(),
        "Describe a time when you had to lead a technical decision that was controversial.".into(),
        "How do you balance technical debt with feature delivery?".into(),
        "Tell me about a time you had to influence stakeholders without direct authority.".into(),
    ]
}

fn default_follow_ups() -> Vec<String> {
    vec![
        "Can you elaborate on that a bit more?".into(),
        "What would you do differently if you faced that situation again?".into(),
        "How did that experience change your approach to similar challenges?".into(),
        "What did you learn from that experience?".into(),
    ]
}

fn default_greeting_template() -> String {
    "Hi! I'm {name}, {title} at {company}. Thank you for taking the time to interview with us today. I'm excited to learn more about your experience and how you approach technical challenges. Shall we get started?".into()
}

fn default_closing_template() -> String {
    "Thank you for your time today! Based on our conversation, I'd say you demonstrated strong technical communication skills. Your overall performance score is {score}/10. We'll be in touch soon with next steps.".into()
}

/// Why an interview could not be opened.
#[derive(Debug, PartialEq, Eq)]
pub enum InterviewSetupError {
    UnknownInterviewer,
    UnknownLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewPhase {
    Active,
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Interviewer,
    Candidate,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewTurn {
    pub speaker: Speaker,
    pub content: String,
    pub at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl InterviewTurn {
    fn interviewer(content: String) -> Self {
        Self { speaker: Speaker::Interviewer, content, at: Utc::now(), score: None, feedback: None }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSession {
    pub id: Uuid,
    pub interviewer: String,
    pub level: String,
    pub phase: InterviewPhase,
    pub transcript: Vec<InterviewTurn>,
    /// Scripted questions asked so far (the greeting question counts).
    pub questions_asked: usize,
    pub score_total: u32,
    pub answers: u32,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<u8>,
}

impl InterviewSession {
    /// Open a new interview: greeting plus the level's first question.
    pub fn begin(
        script: &InterviewScript,
        interviewer_id: &str,
        level: &str,
    ) -> Result<Self, InterviewSetupError> {
        let profile = script
            .interviewer(interviewer_id)
            .ok_or(InterviewSetupError::UnknownInterviewer)?;
        let questions = script
            .questions(level)
            .ok_or(InterviewSetupError::UnknownLevel)?;

        let greeting = script
            .greeting_template
            .replace("{name}", &profile.name)
            .replace("{title}", &profile.title)
            .replace("{company}", &profile.company);

        let mut transcript = vec![InterviewTurn::interviewer(greeting)];
        let mut questions_asked = 0;
        if let Some(first) = questions.first() {
            transcript.push(InterviewTurn::interviewer(first.clone()));
            questions_asked = 1;
        }

        Ok(Self {
            id: Uuid::new_v4(),
            interviewer: interviewer_id.to_string(),
            level: level.to_string(),
            phase: InterviewPhase::Active,
            transcript,
            questions_asked,
            score_total: 0,
            answers: 0,
            started_at: Utc::now(),
            ended_at: None,
            final_score: None,
        })
    }

    /// Record a scored candidate turn and produce the interviewer's reply:
    /// the next scripted question while any remain, a canned follow-up after.
    pub fn submit(&mut self, script: &InterviewScript, text: String, eval: &Evaluation) -> String {
        self.transcript.push(InterviewTurn {
            speaker: Speaker::Candidate,
            content: text,
            at: Utc::now(),
            score: Some(eval.score),
            feedback: Some(eval.feedback.clone()),
        });
        self.score_total += u32::from(eval.score);
        self.answers += 1;

        let questions = script.questions(&self.level).unwrap_or(&[]);
        let reply = if self.questions_asked < questions.len() {
            let next = format!("That's interesting. {}", questions[self.questions_asked]);
            self.questions_asked += 1;
            next
        } else {
            script
                .follow_ups
                .choose(&mut rand::thread_rng())
                .cloned()
                .unwrap_or_else(|| "Can you elaborate on that a bit more?".into())
        };

        self.transcript.push(InterviewTurn::interviewer(reply.clone()));
        reply
    }

    /// Close the interview with the averaged score and the closing line.
    pub fn finish(&mut self, script: &InterviewScript) -> (u8, String) {
        let final_score =
            (f64::from(self.score_total) / f64::from(self.answers.max(1))).round() as u8;
        let closing = script
            .closing_template
            .replace("{score}", &final_score.to_string());

        self.transcript.push(InterviewTurn::interviewer(closing.clone()));
        self.phase = InterviewPhase::Ended;
        self.ended_at = Some(Utc::now());
        self.final_score = Some(final_score);
        (final_score, closing)
    }
}
