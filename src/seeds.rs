//! Built-in seed data: the demo user and the default question bank.
//!
//! The bank guarantees the app is useful without any external config file;
//! APP_CONFIG_PATH entries are appended on top of these.

use chrono::Utc;

use crate::domain::{NewQuestion, User, DEMO_USER_ID};

/// Single demo account the mocked client-side login resolves to.
pub fn seed_user() -> User {
  User {
    id: DEMO_USER_ID,
    username: "alexchen".into(),
    password: "password".into(),
    name: "Alex Chen".into(),
    email: "alex.chen@example.com".into(),
    current_role: "software-developer".into(),
    created_at: Utc::now(),
  }
}

/// Default question bank. Order matters: ids are assigned in insertion order.
pub fn seed_questions() -> Vec<NewQuestion> {
  vec![
    NewQuestion {
      title: "Explaining Technical Concepts to Non-Technical Stakeholders".into(),
      description: "You're a senior developer working on a complex microservices architecture. During a sprint review, the product manager asks you to explain why the recent API response times have increased and what your team is doing to address it. How would you communicate this technical issue in a way that's accessible to non-technical stakeholders while maintaining accuracy?".into(),
      category: "communication".into(),
      role: "software-developer".into(),
      difficulty: "senior".into(),
      sample_answer: "I would start by setting context and using analogies. For example, 'Think of our system like a busy restaurant. Recently, we've had more customers (traffic) than usual, and our kitchen (servers) is taking longer to prepare orders. The issue isn't with the quality of food, but with how we're handling the increased volume.' Then I'd explain the business impact: 'This translates to users waiting an extra 2-3 seconds for pages to load, which could impact user satisfaction and potentially conversions.' Finally, I'd provide a clear solution and timeline: 'We're implementing two solutions: optimizing our kitchen workflow (code optimization) by next sprint, and adding more cooking stations (server capacity) within two weeks. This should reduce response times by 60%.'".into(),
      tips: vec![
        "Use analogies or real-world comparisons".into(),
        "Focus on business impact rather than technical details".into(),
        "Provide clear next steps and timelines".into(),
        "Acknowledge concerns and show empathy".into(),
      ],
      keywords: vec![
        "communication".into(),
        "stakeholder management".into(),
        "technical translation".into(),
        "business impact".into(),
      ],
    },
    NewQuestion {
      title: "Code Review Feedback".into(),
      description: "A junior developer on your team has submitted a pull request with code that works but doesn't follow best practices. The code is poorly structured, lacks proper error handling, and doesn't include tests. How would you provide constructive feedback that helps them improve without discouraging them?".into(),
      category: "collaboration".into(),
      role: "software-developer".into(),
      difficulty: "mid".into(),
      sample_answer: "I would start by acknowledging what they did well: 'Great job getting the feature working and handling the edge cases in the user interface.' Then I'd frame improvements as learning opportunities: 'I see some areas where we can make this code even more robust and maintainable.' I'd provide specific, actionable feedback with examples: 'For error handling, we could add try-catch blocks around the API calls. Here's how we typically structure that...' I'd also offer to pair program: 'Would you like to hop on a call tomorrow to refactor this together? I can show you some patterns we use for testing these types of components.'".into(),
      tips: vec![
        "Start with positive feedback".into(),
        "Be specific and actionable".into(),
        "Offer to help and teach".into(),
        "Frame as learning opportunities".into(),
      ],
      keywords: vec![
        "code review".into(),
        "mentoring".into(),
        "constructive feedback".into(),
        "team collaboration".into(),
      ],
    },
    NewQuestion {
      title: "Handling Conflicting Priorities".into(),
      description: "You're working as a tech lead and receive conflicting priorities from two different stakeholders. The product manager wants you to focus on a new feature for an upcoming demo, while the engineering manager wants you to prioritize fixing technical debt that's slowing down the team. How do you handle this situation?".into(),
      category: "leadership".into(),
      role: "tech-lead".into(),
      difficulty: "senior".into(),
      sample_answer: "I would first gather all the information I need by speaking with both stakeholders separately to understand their reasoning and constraints. Then I'd schedule a meeting with both stakeholders together to facilitate a transparent discussion. I'd present the trade-offs clearly: 'If we focus on the demo feature, we'll hit the deadline but the technical debt will continue to slow our velocity by about 30%. If we address the technical debt first, we'll increase our long-term velocity but might need to push the demo by one week.' I'd also propose a compromise if possible: 'Could we scope down the demo feature to address the most critical technical debt issues first, then deliver a simplified version for the demo?'".into(),
      tips: vec![
        "Gather information from all parties".into(),
        "Facilitate transparent discussions".into(),
        "Present clear trade-offs".into(),
        "Look for compromise solutions".into(),
      ],
      keywords: vec![
        "conflict resolution".into(),
        "stakeholder management".into(),
        "prioritization".into(),
        "leadership".into(),
      ],
    },
    NewQuestion {
      title: "Cross-Team Collaboration".into(),
      description: "Your development team needs to integrate with an API developed by another team, but their API doesn't meet your requirements and they're reluctant to make changes. How do you approach this situation to find a solution that works for both teams?".into(),
      category: "collaboration".into(),
      role: "software-developer".into(),
      difficulty: "mid".into(),
      sample_answer: "I would start by understanding their perspective and constraints. I'd schedule a meeting to discuss our requirements and ask about their concerns with making changes. I'd come prepared with specific examples: 'We need the user data to include the email field for our notifications feature. Could we explore adding this to the response?' If they can't make changes, I'd look for alternative solutions: 'If modifying the API isn't possible right now, could we set up a separate endpoint for this data, or would you be open to a webhook approach?' I'd also consider if we could adapt our approach: 'We could potentially call two endpoints and merge the data on our side if that's easier for your team.'".into(),
      tips: vec![
        "Understand their constraints".into(),
        "Come with specific requirements".into(),
        "Explore alternative solutions".into(),
        "Be willing to adapt your approach".into(),
      ],
      keywords: vec![
        "cross-team collaboration".into(),
        "API integration".into(),
        "problem-solving".into(),
        "compromise".into(),
      ],
    },
    NewQuestion {
      title: "Technical Architecture Decisions".into(),
      description: "As a solution architect, you need to recommend whether to build a new feature using microservices or add it to the existing monolith. The team is split on the decision. How do you evaluate the options and communicate your recommendation?".into(),
      category: "technical-mentoring".into(),
      role: "architect".into(),
      difficulty: "senior".into(),
      sample_answer: "I would start by defining the evaluation criteria with the team: scalability needs, team structure, timeline, complexity, and maintenance overhead. Then I'd analyze each option systematically: 'For the monolith approach, we can deliver faster (2-3 weeks vs 4-5 weeks), leverage existing code, but we'll increase coupling and deployment risk. For microservices, we get better scalability and team autonomy, but we add network complexity and operational overhead.' I'd present data: 'Based on our traffic projections, we won't need the scalability benefits of microservices for at least 18 months.' Finally, I'd make a clear recommendation with reasoning: 'I recommend starting with the monolith approach for speed, with a clear plan to extract it to a microservice when we hit 10x current traffic or when we have a dedicated team for this domain.'".into(),
      tips: vec![
        "Define clear evaluation criteria".into(),
        "Analyze systematically with data".into(),
        "Consider team and business context".into(),
        "Provide clear reasoning for recommendations".into(),
      ],
      keywords: vec![
        "architecture decisions".into(),
        "technical strategy".into(),
        "trade-off analysis".into(),
        "team alignment".into(),
      ],
    },
  ]
}
