//! Prompt builders for every AI-driven operation.
//!
//! Each builder produces the full instruction text for one completion call,
//! including the exact JSON shape expected back where the reply is decoded
//! structurally.

use crate::assist::{CareerProfile, Subject};
use crate::interview::{Answer, Evaluation, InterviewConfig, InterviewSession, Question};

pub fn question_generation(config: &InterviewConfig) -> String {
    let topics = if config.languages.is_empty() {
        config.job_role.clone()
    } else {
        config.languages.join(", ")
    };

    format!(
        "Generate {count} short {kind} interview questions for a {role} candidate covering {topics}.

Return ONLY this JSON format:
[
  {{\"id\": 1, \"type\": \"technical\", \"category\": \"JavaScript\", \"question\": \"What is a variable?\", \"expectedPoints\": [\"Definition\", \"Usage\"], \"difficulty\": \"{difficulty}\", \"timeLimit\": 300}}
]",
        count = config.number_of_questions.max(1),
        kind = config.interview_type.as_str(),
        role = config.job_role,
        topics = topics,
        difficulty = config.difficulty.as_str(),
    )
}

pub fn answer_evaluation(question: &Question, answer: &str) -> String {
    format!(
        "You are an expert interviewer evaluating a candidate's response.
Evaluate the following answer based on:

Question: {question}
Expected Points: {points}
Question Type: {kind}
Difficulty: {difficulty}

User's Answer: \"{answer}\"

Provide evaluation in this exact JSON format:
{{
  \"score\": 85,
  \"strengths\": [\"strength1\", \"strength2\"],
  \"weaknesses\": [\"weakness1\", \"weakness2\"],
  \"improvements\": [\"improvement1\", \"improvement2\"],
  \"technicalAccuracy\": 90,
  \"communicationClarity\": 80,
  \"problemSolving\": 85,
  \"detailedFeedback\": \"Comprehensive feedback about the answer...\"
}}",
        question = question.question,
        points = question.expected_points.join(", "),
        kind = question.kind.as_str(),
        difficulty = question.difficulty.as_str(),
    )
}

pub fn interview_feedback(
    session: &InterviewSession,
    answers: &[Answer],
    evaluations: &[Evaluation],
    total_time: u64,
) -> String {
    let average_score = if evaluations.is_empty() {
        0.0
    } else {
        evaluations.iter().map(|e| e.score as f64).sum::<f64>() / evaluations.len() as f64
    };

    let mut per_question = String::new();
    let mut evaluation_index = 0usize;
    for (i, question) in session.questions.iter().enumerate() {
        let skipped = answers.get(i).map(Answer::is_skipped).unwrap_or(true);
        let score = if skipped {
            0
        } else {
            let score = evaluations.get(evaluation_index).map(|e| e.score).unwrap_or(0);
            evaluation_index += 1;
            score
        };
        per_question.push_str(&format!(
            "\nQ{number}: {text}\nScore: {score}%{skipped}\nType: {kind}\n",
            number = i + 1,
            text = question.question,
            score = score,
            skipped = if skipped { " (skipped)" } else { "" },
            kind = question.kind.as_str(),
        ));
    }

    format!(
        "You are an expert career coach and interviewer providing comprehensive feedback on an interview performance.

Interview Details:
- Job Role: {role}
- Total Questions: {total}
- Total Time: {time} seconds
- Average Score: {average:.0}%

Question-by-Question Performance:
{per_question}
Provide comprehensive feedback in this exact JSON format:
{{
  \"overallScore\": 85,
  \"categoryScores\": {{
    \"technical\": 88,
    \"behavioral\": 82,
    \"communication\": 80,
    \"problemSolving\": 85
  }},
  \"strengths\": [\"strength1\", \"strength2\", \"strength3\"],
  \"areasForImprovement\": [\"area1\", \"area2\", \"area3\"],
  \"detailedAnalysis\": \"Comprehensive analysis of performance...\",
  \"recommendations\": [\"recommendation1\", \"recommendation2\", \"recommendation3\"],
  \"nextSteps\": [\"step1\", \"step2\", \"step3\"],
  \"readinessLevel\": \"ready|needs_improvement|significant_practice_needed\"
}}",
        role = session.config.job_role,
        total = session.questions.len(),
        time = total_time,
        average = average_score,
        per_question = per_question,
    )
}

pub fn doubt_solver(question: &str) -> String {
    format!(
        "You are an expert AI tutor. Given the student's academic question below, provide a clear and detailed explanation in the form of 3 to 6 concise bullet points. Be accurate, step-by-step, and easy to understand.

Question: {question}

Answer:"
    )
}

pub fn study_schedule(daily_hours: f32, subjects: &[Subject]) -> String {
    let subject_details = subjects
        .iter()
        .enumerate()
        .map(|(i, subject)| {
            format!(
                "{}. {} - Exam: {} - Priority: {}",
                i + 1,
                subject.name,
                subject.exam_date,
                subject.priority
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an expert AI study planner.

Create a personalized study schedule for the student with:
- Daily Study Hours: {daily_hours}
- Subjects:
{subject_details}

Instructions:
- Allocate more time to high-priority subjects and those with nearer exams.
- Spread time effectively over the days.
- Format like:
  - Aug 7: 3h Math, 2h Science
  - Aug 8: ...
Return a practical 7-14 day plan."
    )
}

pub fn smart_notes(notes: &str) -> String {
    format!(
        "You are an AI assistant. Given the lecture notes below, respond ONLY in this exact format:

Summary:
<summary content>

Key Points:
- <key point 1>
- <key point 2>
- <key point 3>
- <key point 4>
- <key point 5>

Definitions:
<term>: <definition>
<term>: <definition>

Flashcards:
Q: <question 1>
A: <answer 1>

Q: <question 2>
A: <answer 2>

Q: <question 3>
A: <answer 3>

Q: <question 4>
A: <answer 4>

Q: <question 5>
A: <answer 5>

Lecture Notes:
{notes}"
    )
}

pub const CAREER_COUNSELOR_ROLE: &str = "You are a helpful and experienced AI career guidance counselor. Your job is to help students discover suitable career paths based on their background.";

pub fn career_guidance(profile: &CareerProfile) -> String {
    format!(
        "You are an expert AI Career Counselor. Based on the student's details below, guide them towards suitable career paths and preparation tips.

Student Details:
- Interests: {interests}
- Academic Performance: {performance}
- Location: {location}
- Education Level: {level}

If there's any prior conversation history, continue the discussion helpfully. Respond like a warm and helpful mentor.",
        interests = profile.interests,
        performance = profile.performance,
        location = profile.location,
        level = profile.level,
    )
}
