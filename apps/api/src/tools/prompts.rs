// Tool prompt templates. Placeholders are replaced with `str::replace`.

/// Replace `{count}` and `{resumes}`.
pub const COMPARISON_PROMPT: &str = r#"Analyze and compare these {count} resumes. For each resume, extract:
1. Candidate name (if available)
2. Key skills, split into technical and soft
3. Years of experience
4. Education level
5. Notable achievements

Then compare them:
- Skills shared by every candidate
- Skills unique to each candidate, keyed by candidate name
- A short experience comparison
- An overall ranking of candidate names, best first, based on typical hiring criteria

Return exactly one entry in "candidates" per resume, in resume order, using this JSON format:
{
  "candidates": [
    {
      "name": string,
      "skills": { "technical": [string], "soft": [string] },
      "experience": number,
      "education": string,
      "achievements": [string]
    }
  ],
  "comparison": {
    "skillsOverlap": [string],
    "uniqueSkills": { "<candidate name>": [string] },
    "experienceComparison": string,
    "ranking": [string]
  }
}

Resume texts:{resumes}"#;

/// Replace `{count}`, `{job_description}` and `{resumes}`.
pub const JOB_MATCH_PROMPT: &str = r#"Analyze these {count} resumes against the job description below.
For each resume, in resume order, give:
1. A match score from 0 to 100 based on required skills and qualifications
2. Key strengths that align with the job
3. Missing qualifications or gaps
4. An overall recommendation: "Strong", "Moderate" or "Weak"

Also provide:
- The top 3 candidates ranked by match score
- Missing qualifications common across candidates
- Suggested interview questions probing the gaps

Job Description:
{job_description}

Resume texts:{resumes}

Return the analysis in this JSON format:
{
  "analysis": [
    {
      "candidateName": string,
      "matchScore": number,
      "strengths": [string],
      "gaps": [string],
      "recommendation": "Strong" | "Moderate" | "Weak"
    }
  ],
  "topCandidates": [string],
  "commonGaps": [string],
  "interviewQuestions": [string]
}"#;

/// Replace `{count}` and `{job_description}`.
pub const INTERVIEW_QUESTIONS_PROMPT: &str = r#"Generate {count} technical interview questions with model answers based on this job description.
Return ONLY a JSON array of objects with "question" and "answer" properties:
[{"question": "...", "answer": "..."}]

Job Description:
{job_description}"#;
