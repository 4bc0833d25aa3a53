//! Trainer statistics

use std::{fmt, sync::Arc};

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use domain::{Client, TrainerId, TrainerStatistics, Workout, WorkoutStatus};

use crate::{
    error::ApplicationError,
    ports::{ClientStore, WorkoutStore},
};

/// Aggregates the counters shown by `/stats`
#[derive(Clone)]
pub struct StatisticsService {
    clients: Arc<dyn ClientStore>,
    workouts: Arc<dyn WorkoutStore>,
}

impl fmt::Debug for StatisticsService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatisticsService").finish_non_exhaustive()
    }
}

impl StatisticsService {
    #[must_use]
    pub fn new(clients: Arc<dyn ClientStore>, workouts: Arc<dyn WorkoutStore>) -> Self {
        Self { clients, workouts }
    }

    /// Counters as of `now` in the trainer's timezone
    pub async fn collect(
        &self,
        trainer_id: TrainerId,
        now: DateTime<Tz>,
    ) -> Result<TrainerStatistics, ApplicationError> {
        let clients = self.clients.list(trainer_id).await?;
        let workouts = self.workouts.list(trainer_id).await?;
        Ok(compute(&clients, &workouts, now))
    }
}

fn month_start(today: NaiveDate) -> NaiveDate {
    today.with_day(1).unwrap_or(today)
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Tally statistics for the month and day containing `now`
#[must_use]
pub fn compute(clients: &[Client], workouts: &[Workout], now: DateTime<Tz>) -> TrainerStatistics {
    let today = now.date_naive();
    let first_of_month = month_start(today);
    let month_start_utc = now
        .timezone()
        .from_local_datetime(&first_of_month.and_time(chrono::NaiveTime::MIN))
        .earliest()
        .map_or(DateTime::<Utc>::MIN_UTC, |start| start.with_timezone(&Utc));

    let in_month = |date: NaiveDate| date.year() == today.year() && date.month() == today.month();

    TrainerStatistics {
        total_clients: count(clients.len()),
        active_clients: count(clients.iter().filter(|c| c.is_active).count()),
        new_clients_this_month: count(
            clients
                .iter()
                .filter(|c| c.created_at >= month_start_utc)
                .count(),
        ),
        total_workouts: count(workouts.len()),
        workouts_this_month: count(
            workouts
                .iter()
                .filter(|w| in_month(w.scheduled_date.date()))
                .count(),
        ),
        completed_workouts: count(
            workouts
                .iter()
                .filter(|w| w.status == WorkoutStatus::Completed)
                .count(),
        ),
        today_workouts: count(
            workouts
                .iter()
                .filter(|w| w.scheduled_date.date() == today)
                .count(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDateTime};
    use chrono_tz::Europe::Moscow;
    use domain::{ClientId, WorkoutDuration, WorkoutId};

    fn now() -> DateTime<Tz> {
        Moscow.with_ymd_and_hms(2024, 5, 22, 12, 0, 0).unwrap()
    }

    fn client(id: i64, created_at: DateTime<Utc>, active: bool) -> Client {
        Client {
            id: ClientId::new(id),
            first_name: "Анна".to_string(),
            last_name: None,
            phone: None,
            email: None,
            gender: None,
            height: None,
            weight: None,
            primary_goal: None,
            activity_level: None,
            medical_conditions: None,
            is_active: active,
            created_at,
        }
    }

    fn workout(id: i64, at: NaiveDateTime, status: WorkoutStatus) -> Workout {
        Workout {
            id: WorkoutId::new(id),
            trainer_id: TrainerId::new(1),
            client_id: ClientId::new(1),
            scheduled_date: at,
            workout_type: None,
            duration: WorkoutDuration::DEFAULT,
            location: None,
            trainer_notes: None,
            status,
            completed_at: None,
            client_feedback: None,
            perceived_exertion: None,
            created_at: Utc::now(),
        }
    }

    fn local(day: u32, month: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn empty_roster() {
        assert_eq!(compute(&[], &[], now()), TrainerStatistics::default());
    }

    #[test]
    fn counts_month_and_day() {
        let start_of_may_utc = Moscow
            .with_ymd_and_hms(2024, 5, 1, 0, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        let clients = vec![
            client(1, start_of_may_utc, true),
            client(2, start_of_may_utc - Duration::seconds(1), true),
            client(3, start_of_may_utc + Duration::days(3), false),
        ];
        let workouts = vec![
            workout(1, local(22, 5, 9), WorkoutStatus::Completed),
            workout(2, local(22, 5, 18), WorkoutStatus::Planned),
            workout(3, local(30, 4, 18), WorkoutStatus::Completed),
            workout(4, local(1, 6, 10), WorkoutStatus::Planned),
        ];

        let stats = compute(&clients, &workouts, now());
        assert_eq!(stats.total_clients, 3);
        assert_eq!(stats.active_clients, 2);
        assert_eq!(stats.new_clients_this_month, 2);
        assert_eq!(stats.total_workouts, 4);
        assert_eq!(stats.workouts_this_month, 2);
        assert_eq!(stats.completed_workouts, 2);
        assert_eq!(stats.today_workouts, 2);
    }
}
