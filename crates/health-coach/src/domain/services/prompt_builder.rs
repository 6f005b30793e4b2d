//! Prompt Builder - Natural-language prompts for each coaching flow
//!
//! Every builder is pure and total: missing optional data renders as a
//! placeholder instead of failing.

use crate::domain::entities::{
    ChatRequest, FollowUpRequest, NutritionRecall, NutritionRequest, OriginalRequest,
    RoutineRecall, RoutineRequest, UserContext,
};

/// System persona sent with every completion
pub const COACH_PERSONA: &str = "You are a master health coach with deep expertise in nutrition science, chronobiology, and cognitive behavioral science. \
Your communication style is warm, personalized, and conversational, as if you're speaking directly to your client. \
You explain the reasoning behind your recommendations and provide specific, actionable choices tailored to the client's lifestyle. \
You always structure your responses by time periods of the day, connecting recommendations to the client's energy patterns.";

/// Peak mode assumed for nutrition plans when none is known
pub const DEFAULT_PEAK_MODE: &str = "Physique";

const NONE: &str = "None";
const NOT_SPECIFIED: &str = "Not specified";

/// The six energy phases every plan is organised around: (name, when)
pub const DAY_SEGMENTS: [(&str, &str); 6] = [
    ("Pre-First Wind", "Upon Waking Up"),
    ("First Wind", "Morning Work Session"),
    ("Midday Slump", "Lunch Break"),
    ("Pre-Second Wind", "Afternoon Work Session"),
    ("Second Wind", "Evening Routine"),
    ("Unwind", "Before Bed"),
];

fn join_or(items: &[String], fallback: &str) -> String {
    let items: Vec<&str> = items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

fn or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_SPECIFIED,
    }
}

fn segment_headings() -> String {
    DAY_SEGMENTS
        .iter()
        .map(|(name, when)| format!("{} ({}):", name, when))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Routine planning prompt
pub fn routine_prompt(request: &RoutineRequest) -> String {
    format!(
        r#"Create a personalized daily routine for a client with the following preferences:

Peak Mode: {peak_mode}
Sleep Chronotype: {chronotype}
Nature of Commutes: {commutes}
Nature of Traveling: {traveling}
Easiness of Regimen: {easiness} (1-10, where 10 is easiest)
Observation Level: {observation} (1-10, where 10 is highest)
Challenges: {challenges}

Present your response in a conversational, personalized format structured by time periods of the day:

{segments}

For each time period:
1. Explain the significance of this energy phase
2. Provide 2-3 specific recommendations with brief explanations
3. Connect recommendations directly to their challenges and peak mode
4. Use a warm, conversational tone as if speaking directly to the client

End with a brief summary of how following this routine will help address their specific challenges and support their peak mode goal.
"#,
        peak_mode = or_placeholder(Some(&request.peak_mode)),
        chronotype = or_placeholder(Some(&request.sleep_chronotype)),
        commutes = or_placeholder(Some(&request.nature_of_commutes)),
        traveling = or_placeholder(Some(&request.nature_of_traveling)),
        easiness = request.easiness_of_regimen,
        observation = request.observation_level,
        challenges = join_or(&request.challenges, NONE),
        segments = segment_headings(),
    )
}

/// Nutrition planning prompt
///
/// `peak_mode` falls back to [`DEFAULT_PEAK_MODE`]; challenges are only
/// mentioned when there are some.
pub fn nutrition_prompt(request: &NutritionRequest) -> String {
    let peak_mode = match request.peak_mode.as_deref() {
        Some(mode) if !mode.trim().is_empty() => mode,
        _ => DEFAULT_PEAK_MODE,
    };

    let challenges_line = match request.challenges.as_deref() {
        Some(challenges) if challenges.iter().any(|c| !c.trim().is_empty()) => {
            format!("Challenges: {}\n", join_or(challenges, NONE))
        }
        _ => String::new(),
    };

    let (first_name, first_when) = DAY_SEGMENTS[0];
    let (second_name, second_when) = DAY_SEGMENTS[1];
    let remaining = DAY_SEGMENTS[2..]
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"Create a personalized nutrition plan for a client with the following parameters:

Target Goal: {target_goal}
Current Body Composition: {composition}
Activity Level: {activity_level}
Daily Step Count: {steps}
Resting Metabolic Rate: {rmr}
Macronutrient Preferences: {macros}
Intermittent Fasting: {fasting}
Meals Per Day: {meals}
Eating Window: {eating_window}
Protein Source Preference: {protein}
Carb Tolerance: {carbs}
Fat Preference: {fat}
Food Sensitivities: {sensitivities}
Cultural Dietary Category: {culture}
Cooking Ability: {cooking}
Meal Prep Frequency: {meal_prep}
Eating Out Frequency: {eating_out}
Kitchen Access: {kitchen}
Existing Supplements: {supplements}
Willing to Supplement: {willing}
Water Intake Target: {water}
Caffeine Consumption: {caffeine}
Electrolyte Needs: {electrolytes}
Peak Mode: {peak_mode}
{challenges_line}
Instead of presenting this as a structured nutrition document, respond in a personalized, conversational format organized by time periods of the day. Format your response like this:

Based on your {peak_mode} focus and your profile, here's a personalized nutrition plan that aligns with your daily routine:

{first_name} ({first_when}) - This is the time to gently awaken your body:
[Nutrition Strategy]: [Brief explanation connecting to their physiology and goals]
* Choice 1: [Specific food/meal option with details]
* Choice 2: [Alternative option with details]
This approach helps with [specific goal or challenge] by [explanation of benefits].

{second_name} ({second_when}) - When your energy begins to rise:
[Continue this pattern for {remaining}]

Give 2-3 choices for each time period and connect them to the client's goal{challenge_hint}.

Include a brief note about hydration and supplementation that integrates with their daily routine and supports their specific goals.

Your response should feel like personalized coaching advice rather than a clinical nutrition document.
"#,
        target_goal = or_placeholder(Some(&request.target_goal)),
        composition = request.current_body_composition,
        activity_level = or_placeholder(Some(&request.activity_level)),
        steps = request.daily_step_count,
        rmr = request.resting_metabolic_rate,
        macros = or_placeholder(Some(&request.macronutrient_preferences)),
        fasting = yes_no(request.intermittent_fasting),
        meals = request.num_meals_per_day,
        eating_window = or_placeholder(Some(&request.eating_window)),
        protein = or_placeholder(Some(&request.protein_source_preference)),
        carbs = or_placeholder(Some(&request.carb_tolerance)),
        fat = or_placeholder(Some(&request.fat_preference)),
        sensitivities = join_or(&request.food_sensitivities, NONE),
        culture = or_placeholder(Some(&request.cultural_dietary_category)),
        cooking = or_placeholder(Some(&request.cooking_ability)),
        meal_prep = or_placeholder(Some(&request.meal_prep_frequency)),
        eating_out = or_placeholder(Some(&request.eating_out_frequency)),
        kitchen = or_placeholder(Some(&request.kitchen_access)),
        supplements = join_or(&request.existing_supplements, NONE),
        willing = yes_no(request.willingness_to_supplement),
        water = or_placeholder(Some(&request.water_intake_target)),
        caffeine = or_placeholder(Some(&request.caffeine_consumption)),
        electrolytes = or_placeholder(Some(&request.electrolyte_needs)),
        peak_mode = peak_mode,
        challenges_line = challenges_line,
        first_name = first_name,
        first_when = first_when,
        second_name = second_name,
        second_when = second_when,
        remaining = remaining,
        challenge_hint = if challenges_line.is_empty() {
            ""
        } else {
            " and their stated challenges"
        },
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn routine_recall_context(recall: &RoutineRecall) -> String {
    format!(
        "The client previously received a daily routine recommendation with these parameters:\n\
         Peak Mode: {}\n\
         Sleep Chronotype: {}\n\
         Challenges: {}",
        or_placeholder(recall.peak_mode.as_deref()),
        or_placeholder(recall.sleep_chronotype.as_deref()),
        join_or(&recall.challenges, NONE),
    )
}

fn nutrition_recall_context(recall: &NutritionRecall) -> String {
    format!(
        "The client previously received a nutrition plan with these parameters:\n\
         Target Goal: {}\n\
         Macronutrient Preferences: {}\n\
         Carb Tolerance: {}\n\
         Protein Source: {}",
        or_placeholder(recall.target_goal.as_deref()),
        or_placeholder(recall.macronutrient_preferences.as_deref()),
        or_placeholder(recall.carb_tolerance.as_deref()),
        or_placeholder(recall.protein_source_preference.as_deref()),
    )
}

/// Follow-up prompt: recap of the original plan, then the new question
pub fn follow_up_prompt(request: &FollowUpRequest) -> String {
    let context = match &request.original {
        OriginalRequest::Routine(recall) => routine_recall_context(recall),
        OriginalRequest::Nutrition(recall) => nutrition_recall_context(recall),
    };

    format!(
        r#"{context}

Now they're asking: "{question}"

Respond in the same conversational, personalized format organized by time periods of the day.
Ensure your response directly addresses their question while maintaining continuity with their previous plan.
Keep the warm, friendly tone and provide specific, actionable recommendations with explanations of the benefits.
"#,
        context = context,
        question = request.follow_up_question.trim(),
    )
}

/// Short recap of what the caller has told us before, if anything
fn chat_recap(context: &UserContext) -> String {
    let mut recap = String::new();

    if let Some(routine) = context.routine() {
        recap.push_str(&format!(
            "The user previously created a routine plan with peak mode: {} and identified challenges: {}\n",
            or_placeholder(Some(&routine.peak_mode)),
            join_or(&routine.challenges, NONE),
        ));
    }

    if let Some(nutrition) = context.nutrition() {
        recap.push_str(&format!(
            "The user previously created a nutrition plan with target goal: {} and macronutrient preferences: {}\n",
            or_placeholder(Some(&nutrition.target_goal)),
            or_placeholder(Some(&nutrition.macronutrient_preferences)),
        ));
    }

    recap
}

/// Chat prompt, optionally prefixed with the caller's stored plans
pub fn chat_prompt(request: &ChatRequest, context: Option<&UserContext>) -> String {
    let recap = context.map(chat_recap).unwrap_or_default();
    let recap = if recap.is_empty() {
        recap
    } else {
        format!("{}\n", recap)
    };

    format!(
        r#"{recap}The user has sent the following message: "{message}"

Respond as a health coach in a warm, conversational tone. Be helpful and supportive while providing actionable advice.

If they're asking about creating a detailed routine or nutrition plan, suggest they use the dedicated forms in the app for the best personalized experience.

If they have a specific health or nutrition question, provide thoughtful guidance based on your expertise, while being careful not to make medical claims.

If they mention goals or challenges they're facing, tailor your response to address those specific needs.
"#,
        recap = recap,
        message = request.message.trim(),
    )
}
