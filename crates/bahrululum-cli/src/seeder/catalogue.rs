//! The sample course catalogue.

pub struct CourseSeed {
    pub name: &'static str,
    pub description: &'static str,
    pub chapters: &'static [ChapterSeed],
}

pub struct ChapterSeed {
    pub title: &'static str,
    pub description: &'static str,
    pub order: i32,
    pub published: bool,
    pub contents: &'static [ContentSeed],
}

pub struct ContentSeed {
    pub title: &'static str,
    pub description: &'static str,
    pub content_type: &'static str,
    pub file_url: Option<&'static str>,
    pub content_text: Option<&'static str>,
    pub order: i32,
    pub duration_minutes: i32,
}

pub const CATALOGUE: &[CourseSeed] = &[
    CourseSeed {
        name: "Introduction to Rust Programming",
        description: "Learn Rust from the ground up: syntax, ownership, borrowing, \
                      error handling and the standard library.",
        chapters: &[
            ChapterSeed {
                title: "Getting Started with Rust",
                description: "Install the toolchain with rustup and write your first program.",
                order: 1,
                published: true,
                contents: &[
                    ContentSeed {
                        title: "Introduction Video",
                        description: "What Rust is and where it is used.",
                        content_type: "video",
                        file_url: Some("https://example.com/videos/rust-intro.mp4"),
                        content_text: None,
                        order: 1,
                        duration_minutes: 15,
                    },
                    ContentSeed {
                        title: "Installing Rust",
                        description: "Installing rustup on Windows, macOS and Linux.",
                        content_type: "text",
                        file_url: None,
                        content_text: Some(
                            "# Installing Rust\n\n```bash\ncurl --proto '=https' --tlsv1.2 -sSf https://sh.rustup.rs | sh\nrustc --version\n```",
                        ),
                        order: 2,
                        duration_minutes: 10,
                    },
                    ContentSeed {
                        title: "Your First Rust Program",
                        description: "Hello, world with cargo.",
                        content_type: "text",
                        file_url: None,
                        content_text: Some(
                            "# Hello World\n\n```rust\nfn main() {\n    println!(\"Hello, world!\");\n}\n```\n\nRun it with `cargo run`.",
                        ),
                        order: 3,
                        duration_minutes: 5,
                    },
                    ContentSeed {
                        title: "Quiz: Getting Started",
                        description: "Check what you learned.",
                        content_type: "link",
                        file_url: Some("https://example.com/quiz/rust-basics"),
                        content_text: None,
                        order: 4,
                        duration_minutes: 10,
                    },
                ],
            },
            ChapterSeed {
                title: "Variables and Types",
                description: "Bindings, mutability, scalar and compound types.",
                order: 2,
                published: true,
                contents: &[
                    ContentSeed {
                        title: "Variables in Rust",
                        description: "let, mut and shadowing.",
                        content_type: "video",
                        file_url: Some("https://example.com/videos/rust-variables.mp4"),
                        content_text: None,
                        order: 1,
                        duration_minutes: 20,
                    },
                    ContentSeed {
                        title: "Scalar Types",
                        description: "Integers, floats, bool and char.",
                        content_type: "text",
                        file_url: None,
                        content_text: Some(
                            "# Scalar Types\n\n- i8..i128, u8..u128, isize, usize\n- f32, f64\n- bool\n- char (a Unicode scalar value)",
                        ),
                        order: 2,
                        duration_minutes: 15,
                    },
                ],
            },
            ChapterSeed {
                title: "Ownership and Borrowing",
                description: "Moves, references and the borrow checker.",
                order: 3,
                published: true,
                contents: &[],
            },
            ChapterSeed {
                title: "Structs, Enums and Traits",
                description: "Modelling data and behaviour.",
                order: 4,
                published: false,
                contents: &[],
            },
        ],
    },
    CourseSeed {
        name: "Web Development with Axum",
        description: "Build REST APIs with Axum: routing, extractors, middleware, \
                      authentication and testing.",
        chapters: &[
            ChapterSeed {
                title: "Introduction to Axum",
                description: "Create a server and your first route.",
                order: 1,
                published: true,
                contents: &[
                    ContentSeed {
                        title: "What is Axum?",
                        description: "Axum, Tower and Hyper at a glance.",
                        content_type: "video",
                        file_url: Some("https://example.com/videos/axum-intro.mp4"),
                        content_text: None,
                        order: 1,
                        duration_minutes: 12,
                    },
                    ContentSeed {
                        title: "Setting Up Axum",
                        description: "A minimal server.",
                        content_type: "text",
                        file_url: None,
                        content_text: Some(
                            "# Setting Up Axum\n\n```rust\nlet app = Router::new().route(\"/\", get(|| async { \"Hello, Axum!\" }));\nlet listener = tokio::net::TcpListener::bind(\"0.0.0.0:8080\").await?;\naxum::serve(listener, app).await?;\n```",
                        ),
                        order: 2,
                        duration_minutes: 15,
                    },
                ],
            },
            ChapterSeed {
                title: "Routing and Extractors",
                description: "Path, Query, Json and State.",
                order: 2,
                published: true,
                contents: &[],
            },
            ChapterSeed {
                title: "Middleware and Authentication",
                description: "Tower layers and JWT bearer authentication.",
                order: 3,
                published: true,
                contents: &[],
            },
            ChapterSeed {
                title: "Database Access with SQLx",
                description: "Connection pools, queries and migrations.",
                order: 4,
                published: false,
                contents: &[],
            },
        ],
    },
    CourseSeed {
        name: "Database Design and PostgreSQL",
        description: "Relational modelling, SQL, indexing, transactions and \
                      performance tuning with PostgreSQL.",
        chapters: &[
            ChapterSeed {
                title: "Database Fundamentals",
                description: "Tables, rows, columns and keys.",
                order: 1,
                published: true,
                contents: &[
                    ContentSeed {
                        title: "What is a Database?",
                        description: "Introduction to relational databases and PostgreSQL.",
                        content_type: "video",
                        file_url: Some("https://example.com/videos/db-intro.mp4"),
                        content_text: None,
                        order: 1,
                        duration_minutes: 18,
                    },
                    ContentSeed {
                        title: "Installing PostgreSQL",
                        description: "Local installation.",
                        content_type: "text",
                        file_url: None,
                        content_text: Some(
                            "# Installing PostgreSQL\n\n```bash\nsudo apt-get install postgresql\n```",
                        ),
                        order: 2,
                        duration_minutes: 12,
                    },
                    ContentSeed {
                        title: "Database Concepts PDF",
                        description: "Reference guide to database concepts.",
                        content_type: "pdf",
                        file_url: Some("https://example.com/docs/database-concepts.pdf"),
                        content_text: None,
                        order: 3,
                        duration_minutes: 30,
                    },
                ],
            },
            ChapterSeed {
                title: "SQL Basics: CRUD Operations",
                description: "INSERT, SELECT, UPDATE and DELETE.",
                order: 2,
                published: true,
                contents: &[],
            },
            ChapterSeed {
                title: "Advanced Queries and Joins",
                description: "Joins, subqueries and aggregation.",
                order: 3,
                published: true,
                contents: &[],
            },
            ChapterSeed {
                title: "Indexing and Performance",
                description: "Index types and reading query plans.",
                order: 4,
                published: false,
                contents: &[],
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use bahrululum_models::contents::is_valid_content_type;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_has_three_unique_courses() {
        assert_eq!(CATALOGUE.len(), 3);
        let names: HashSet<_> = CATALOGUE.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), CATALOGUE.len());
    }

    #[test]
    fn test_chapter_orders_are_unique_per_course() {
        for course in CATALOGUE {
            let orders: HashSet<_> = course.chapters.iter().map(|c| c.order).collect();
            assert_eq!(orders.len(), course.chapters.len(), "{}", course.name);
            assert!(course.chapters.iter().all(|c| c.order >= 1));
        }
    }

    #[test]
    fn test_contents_are_valid() {
        for chapter in CATALOGUE.iter().flat_map(|c| c.chapters) {
            for content in chapter.contents {
                assert!(is_valid_content_type(content.content_type), "{}", content.title);
                assert!(content.file_url.is_some() || content.content_text.is_some());
                assert!(content.duration_minutes >= 0);
            }
        }
    }
}
