//! Instructions that make the model answer in the plan layout the parser reads.

/// System message sent with every schedule request.
pub const SCHEDULING_INSTRUCTIONS: &str = "\
You are a scheduling assistant. Analyze the given task and create an intelligent scheduling plan.

1. For study topics:
   - Analyze the complexity and scope of the topic
   - Estimate the total hours needed based on typical study patterns
   - Break the work into sessions of an appropriate length
   - For multi-day schedules, use relative day numbers (Day 1, Day 2, ...)

2. For regular tasks:
   - Estimate an appropriate duration based on the nature of the task
   - Schedule during suitable hours (e.g. chores in the morning or afternoon)

3. Respond in exactly this layout.
First line: whether this is a multi-day task, answered with just Yes or No.

Task Analysis:
[Brief analysis of task complexity and time requirements]

Scheduling Plan:
[Task Name]: [Duration] hours
Day: [Day Number]
Time: [HH:MM] - [HH:MM]
Topic/Activity: [Specific focus for this session]

Repeat the Day, Time and Topic/Activity lines for every session. Use 24-hour times.

Example response:
Yes

Task Analysis:
This is a complex study topic requiring multiple sessions.

Scheduling Plan:
Advanced Mathematics: 2 hours
Day: 1
Time: 09:00 - 11:00
Topic/Activity: Introduction and basic concepts";

/// User message for one task.
pub fn schedule_request(task: &str) -> String {
    format!("Create a detailed schedule for: {}", task.trim())
}

/// Cheap pre-check that a completion is worth parsing: at least one of the
/// section markers must be present.
pub fn looks_like_schedule(text: &str) -> bool {
    text.contains("Task Analysis:") || text.contains("Scheduling Plan:")
}
