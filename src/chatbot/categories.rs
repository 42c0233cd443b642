use serde::Serialize;

/// Conversation topic offered by the career chatbot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChatCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub sample_questions: &'static [&'static str],
    #[serde(skip)]
    pub system_prompt: &'static str,
}

pub const DEFAULT_CATEGORY: &str = "general";

const CATEGORIES: &[ChatCategory] = &[
    ChatCategory {
        id: "interview",
        name: "Interview Preparation",
        description: "Practice questions, answer structure and feedback for job interviews",
        sample_questions: &[
            "How should I answer \"Tell me about yourself\"?",
            "What are common questions in a technical interview?",
            "How do I talk about my weaknesses?",
        ],
        system_prompt: "You are an experienced interview coach. Help the user prepare for job \
            interviews: suggest likely questions, show how to structure answers (for example with \
            the STAR method), and give concrete, constructive feedback on answers they share.",
    },
    ChatCategory {
        id: "resume",
        name: "Resume & Cover Letter",
        description: "Writing and improving resumes, CVs and cover letters",
        sample_questions: &[
            "How can I make my resume stand out?",
            "What should a cover letter for a junior developer include?",
            "How do I describe a career gap?",
        ],
        system_prompt: "You are a professional resume consultant. Help the user write and improve \
            resumes and cover letters. Favour quantified achievements, clear structure and wording \
            tailored to the target role. Never invent experience the user did not mention.",
    },
    ChatCategory {
        id: "career",
        name: "Career Advice",
        description: "Career direction, skills development and job changes",
        sample_questions: &[
            "Should I move from backend to data engineering?",
            "Which certifications are worth getting?",
            "How do I prepare for a career change?",
        ],
        system_prompt: "You are a thoughtful career counsellor. Help the user reason about career \
            direction, skills to develop and job changes. Ask clarifying questions when the \
            situation is unclear and lay out trade-offs honestly.",
    },
    ChatCategory {
        id: "job_search",
        name: "Job Search",
        description: "Finding openings, applications and salary negotiation",
        sample_questions: &[
            "Where can I find openings for new graduates?",
            "How do I follow up after submitting an application?",
            "How do I negotiate my salary offer?",
        ],
        system_prompt: "You are a job search advisor. Help the user find suitable openings, plan \
            and track applications, follow up with employers and negotiate offers. Give practical, \
            step-by-step advice.",
    },
    ChatCategory {
        id: "general",
        name: "General",
        description: "Anything else related to finding a job",
        sample_questions: &[
            "What can you help me with?",
            "How should I plan my week of job hunting?",
        ],
        system_prompt: "You are a friendly assistant on a job-seeking platform. Answer questions \
            about finding work clearly and concisely. Reply in the language the user writes in.",
    },
];

pub fn categories() -> &'static [ChatCategory] {
    CATEGORIES
}

pub fn find_category(id: &str) -> Option<&'static ChatCategory> {
    let id = id.trim();
    CATEGORIES.iter().find(|c| c.id.eq_ignore_ascii_case(id))
}
