//! Default course catalog loaded when the server starts.

use course_core::model::{Course, CourseId, Lesson, LessonId};

type LessonSeed = (&'static str, &'static str);

const CATALOG: &[(&str, &str, &[LessonSeed])] = &[
    (
        "JavaScript Fundamentals",
        "Master the basics of JavaScript programming from variables to functions.",
        &[
            ("Introduction to JavaScript", "Learn what JavaScript is and why it's important"),
            ("Variables and Data Types", "Understanding how to store and manipulate data"),
            ("Functions and Scope", "Create reusable code with functions"),
            ("Arrays and Objects", "Work with complex data structures"),
            ("DOM Manipulation", "Interact with web pages dynamically"),
        ],
    ),
    (
        "Web Design Basics",
        "Learn the fundamentals of creating beautiful and responsive websites.",
        &[
            ("HTML Structure", "Build the foundation of web pages"),
            ("CSS Styling", "Make your pages look amazing"),
            ("Responsive Design", "Create sites that work on any device"),
            ("Flexbox and Grid", "Modern layout techniques"),
        ],
    ),
    (
        "Python for Beginners",
        "Start your programming journey with Python, one of the most popular languages.",
        &[
            ("Getting Started with Python", "Install and run your first program"),
            ("Python Syntax", "Learn the rules of writing Python code"),
            ("Data Structures", "Lists, tuples, and dictionaries"),
            ("Control Flow", "If statements and loops"),
            ("Functions and Modules", "Organize your code effectively"),
            ("File Handling", "Read and write files in Python"),
        ],
    ),
    (
        "Database Design",
        "Understand how to design and work with relational databases.",
        &[
            ("Introduction to Databases", "What are databases and why use them"),
            ("SQL Basics", "Query data with SQL"),
            ("Normalization", "Design efficient database structures"),
            ("Relationships", "Connect data across tables"),
        ],
    ),
];

/// The built-in catalog: four courses with ids 1..=4, every lesson incomplete.
#[must_use]
pub fn default_catalog() -> Vec<Course> {
    CATALOG
        .iter()
        .zip(1u64..)
        .map(|(&(title, description, lessons), course_id)| {
            let lessons = lessons
                .iter()
                .zip(1u64..)
                .map(|(&(title, content), lesson_id)| {
                    Lesson::new(LessonId::new(lesson_id), title, content, false)
                })
                .collect();
            Course::new(CourseId::new(course_id), title, description, lessons)
        })
        .collect()
}
