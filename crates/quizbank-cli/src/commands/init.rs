//! The `quizbank init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizbank.toml").exists() {
        println!("quizbank.toml already exists, skipping.");
    } else {
        std::fs::write("quizbank.toml", SAMPLE_CONFIG)?;
        println!("Created quizbank.toml");
    }

    std::fs::create_dir_all("data")?;
    let sample_path = std::path::Path::new("data/sample.csv");
    if sample_path.exists() {
        println!("data/sample.csv already exists, skipping.");
    } else {
        std::fs::write(sample_path, SAMPLE_BANK)?;
        println!("Created data/sample.csv");
    }

    println!("\nNext steps:");
    println!("  1. Add your own question banks to data/");
    println!("  2. Run: quizbank validate --bank sample.csv");
    println!("  3. Run: quizbank take --bank sample.csv");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizbank configuration

data_dir = "./data"
output_dir = "./quizbank-results"

# Fetch banks from a web server instead of data_dir:
# base_url = "https://exams.example.com"
# banks = ["Math Questions.csv"]

# default_max_questions = 20
"#;

const SAMPLE_BANK: &str = r#"Question,Topic,Subtopic,Option 1,Option 2,Option 3,Option 4,Correct Answer
What is 7 x 8?,Math,Arithmetic,54,56,58,64,2
"Which of these is prime: 21, 27, 29, or 33?",Math,Number theory,21,27,29,33,3
What is the chemical symbol for sodium?,Science,Chemistry,So,Sd,Na,Ns,3
Which planet is closest to the sun?,Science,Astronomy,Venus,Earth,Mars,Mercury,4
"Who wrote ""Pride and Prejudice""?",Literature,,Jane Austen,Emily Bronte,Mary Shelley,George Eliot,1
What is the capital of Canada?,,,Toronto,Vancouver,Ottawa,Montreal,3
"#;
