//! Fixed instruction template.

/// Render the prompt for one question. Both values are inserted verbatim.
pub fn build_prompt(question: &str, file_data: &str) -> String {
    format!(
        "You're helping a data science student solving an objective assignment.\n\
         Return only the final correct answer, nothing else - do not include explanation or formatting.\n\
         \n\
         Question: {question}\n\
         Data (if any):\n\
         {file_data}\n\
         Answer:"
    )
}
