use prodcomp_core::TaskKind;

pub const BANNER: &str = "=== IMAGE RECOGNITION AND PRODUCTION TASK ===";

pub const CONSENT: &str = "\
Consent to Participate in Research

Study Title: Image Recognition and Production Task

Purpose of the Study
This study investigates how people recognize and produce labels for images.
You will complete two types of tasks: selecting the correct image from
multiple options, and typing what you see in single images.

What You Will Do
The experiment will take approximately 15-20 minutes. You will complete basic
demographic questions, practice trials to familiarize yourself with the tasks,
and two blocks of experimental trials.

Risks and Benefits
There are no known risks associated with this study. Your participation will
contribute to our understanding of visual recognition and language production.

Confidentiality
Your responses will be kept confidential. No identifying information will be
collected.

Voluntary Participation
Your participation is entirely voluntary. You may withdraw at any time without
penalty.

By choosing \"I Agree\" below, you indicate that you have read and understood
this information and agree to participate in this study.";

pub const CONSENT_CHOICES: &str = "[1] I Agree   [2] I Do Not Agree";

pub const TERMINATED: &str = "Thank you. The experiment has been terminated.";

pub const DEMOGRAPHICS: &str = "About You";
pub const AGE_PROMPT: &str = "Age (3-12):";
pub const GENDER_PROMPT: &str = "Gender (male / female / other):";
pub const ENGLISH_PROMPT: &str = "Is English your first language? (yes / no):";

pub fn instructions(task: TaskKind) -> &'static str {
    match task {
        TaskKind::Comprehension => {
            "\
Instructions: Matching Task

In this task, you will see four images and a word. Your job is to choose the
image that matches the word.
First, you'll do a few practice trials to get familiar with the task."
        }
        TaskKind::Production => {
            "\
Instructions: Naming Task

In this task, you will see a single image. Your job is to say what you see in
the image.
First, you'll do a few practice trials to get familiar with the task."
        }
    }
}

pub const PRACTICE_COMPLETE: &str = "Practice complete! Now starting the main task.";

pub const BREAK: &str = "\
Great job!

You've completed the first part of the experiment.
Now you'll do a different type of task. Take a short break if you need one.";

pub const DEBRIEF: &str = "\
Thank you!

You have completed the experiment. Thank you for your participation!";

pub fn progress(current: usize, total: usize) -> String {
    format!("Trial {current} of {total}")
}

pub const CONTINUE: &str = "Press Enter to continue.";
pub const FINISH: &str = "Press Enter to finish.";
pub const CHOICE_PROMPT: &str = "Your choice (1-4):";
pub const NAME_PROMPT: &str = "Type what you see:";
pub const RETRY: &str = "That answer does not fit this screen, please try again.";
