// Prompt templates for resume analysis.
// Replace `{resume_text}` and `{json_only}` before sending.

/// Grammar + ATS review. The response shape is validated by `GrammarAtsReport`.
pub const GRAMMAR_ATS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume content for grammar issues and ATS (Applicant Tracking System) optimization:

{resume_text}

Provide your response in the following JSON format exactly, with nothing else:
{
  "grammar": {
    "score": [integer between 1-10],
    "issues": ["list", "of", "specific", "grammar", "issues"],
    "suggestions": ["list", "of", "specific", "grammar", "improvement", "suggestions"]
  },
  "ats": {
    "score": [integer between 1-10],
    "optimization": ["list", "of", "suggestions", "to", "make", "the", "resume", "more", "ATS", "friendly"],
    "keywords": ["list", "of", "keywords", "that", "would", "improve", "ATS", "performance", "for", "this", "role"]
  }
}

{json_only}
"#;

/// Overall scoring. The response shape is validated by `ResumeScore`.
pub const SCORE_PROMPT_TEMPLATE: &str = r#"Score and provide feedback for the following resume content:

{resume_text}

Provide a score for clarity (how clearly information is presented), impact (how well achievements are highlighted), and relevance (how relevant the content is for the stated job title). Also provide overall feedback.

Respond in the following JSON format exactly, with nothing else:
{
  "clarity": [integer between 1-10],
  "impact": [integer between 1-10],
  "relevance": [integer between 1-10],
  "overall": [integer between 1-10],
  "feedback": "detailed feedback with specific suggestions for improvement"
}

{json_only}
"#;
