//! Анализ поведения противника (чистые функции над LearnedProfile)
//!
//! "Обучение" = экспоненциальное сглаживание: `value = lerp(value, target, lr)`.
//! Каждое обновление clamp-ится сразу, накопленная ошибка не выводит за [0, 1].

use crate::ai::components::{ActionHistory, ActionRecord, LearnedProfile};
use crate::config::AdaptiveAiSettings;

/// Минимум записей для анализа
pub const MIN_RECORDS_FOR_ANALYSIS: usize = 3;

/// Сколько атак за окно считается "максимально агрессивно"
const AGGRESSION_SATURATION: f32 = 5.0;

/// Дисперсия, при которой predictability падает до 0
const VARIANCE_SCALE: f32 = 5.0;

pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

fn smooth01(value: f32, target: f32, rate: f32) -> f32 {
    clamp01(lerp(value, target, rate))
}

/// Population variance (0 для < 2 значений)
pub fn population_variance(values: &[f32]) -> f32 {
    if values.len() < 2 {
        return 0.0;
    }
    let count = values.len() as f32;
    let mean = values.iter().sum::<f32>() / count;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f32>() / count
}

/// Атак за последние `window` секунд (от новых к старым, стоп на первой старой)
pub fn recent_attack_count(history: &ActionHistory, now: f32, window: f32) -> usize {
    history
        .iter()
        .rev()
        .take_while(|record| now - record.timestamp <= window)
        .filter(|record| record.attacked)
        .count()
}

/// Новая атака противника: частота сглаживается к `1 / gap`, если gap ∈ (0, max_gap]
pub fn observe_attack_gap(profile: &mut LearnedProfile, gap: f32, settings: &AdaptiveAiSettings) {
    if gap > 0.0 && gap <= settings.max_attack_gap {
        profile.attack_frequency =
            smooth01(profile.attack_frequency, 1.0 / gap, settings.learning_rate);
    }
}

/// Периодический анализ истории. Возвращает false, если записей мало.
pub fn analyze(
    profile: &mut LearnedProfile,
    history: &ActionHistory,
    now: f32,
    settings: &AdaptiveAiSettings,
) -> bool {
    if history.len() < MIN_RECORDS_FOR_ANALYSIS {
        return false;
    }

    let rate = settings.learning_rate;

    let distances: Vec<f32> = history
        .newest(settings.analysis_window)
        .filter(|record| record.attacked)
        .map(|record: &ActionRecord| record.distance_at_attack)
        .collect();

    if !distances.is_empty() {
        let mean = distances.iter().sum::<f32>() / distances.len() as f32;
        profile.preferred_attack_distance =
            lerp(profile.preferred_attack_distance, mean, rate).max(0.0);

        if distances.len() >= MIN_RECORDS_FOR_ANALYSIS {
            let variance = population_variance(&distances);
            let target = 1.0 - clamp01(variance / VARIANCE_SCALE);
            profile.pattern_predictability =
                smooth01(profile.pattern_predictability, target, rate);
        }
    }

    let recent = recent_attack_count(history, now, settings.aggression_window);
    let target = clamp01(recent as f32 / AGGRESSION_SATURATION);
    profile.opponent_aggressiveness = smooth01(profile.opponent_aggressiveness, target, rate);

    adapt_strategy(profile, rate);
    true
}

/// Стратегия от агрессивности противника:
/// - агрессивный (> 0.6) → осторожнее
/// - пассивный (< 0.3) → агрессивнее
/// - иначе → баланс
pub fn adapt_strategy(profile: &mut LearnedProfile, rate: f32) {
    let (aggression, caution) = if profile.opponent_aggressiveness > 0.6 {
        (0.3, 0.8)
    } else if profile.opponent_aggressiveness < 0.3 {
        (0.8, 0.3)
    } else {
        (0.5, 0.5)
    };

    profile.self_aggressiveness = smooth01(profile.self_aggressiveness, aggression, rate);
    profile.self_caution = smooth01(profile.self_caution, caution, rate);

    // Предсказуемого противника можно наказывать
    if profile.pattern_predictability > 0.7 {
        profile.self_aggressiveness = clamp01(profile.self_aggressiveness + 0.1);
    }
}

/// Бот получил урон
pub fn on_self_damaged(profile: &mut LearnedProfile) {
    profile.self_caution = clamp01(profile.self_caution + 0.15);
    profile.self_aggressiveness = clamp01(profile.self_aggressiveness - 0.1);
    profile.opponent_aggressiveness = clamp01(profile.opponent_aggressiveness + 0.1);
}

/// Бот задел противника
pub fn on_opponent_damaged(profile: &mut LearnedProfile) {
    profile.self_aggressiveness = clamp01(profile.self_aggressiveness + 0.05);
}
