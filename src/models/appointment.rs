//! Patient appointment list for the current session.

use chrono::NaiveDate;
use tracing::info;

use crate::booking::{AppointmentId, ConfirmedAppointment};
use crate::error::{AppError, Result};
use crate::notify::{Notification, NotificationSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn label(self) -> &'static str {
        match self {
            AppointmentStatus::Upcoming => "Upcoming",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }
}

/// Status dropdown on the appointments page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Upcoming,
    Completed,
    Cancelled,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Upcoming,
        StatusFilter::Completed,
        StatusFilter::Cancelled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All Appointments",
            StatusFilter::Upcoming => "Upcoming",
            StatusFilter::Completed => "Completed",
            StatusFilter::Cancelled => "Cancelled",
        }
    }

    fn matches(self, status: AppointmentStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Upcoming => status == AppointmentStatus::Upcoming,
            StatusFilter::Completed => status == AppointmentStatus::Completed,
            StatusFilter::Cancelled => status == AppointmentStatus::Cancelled,
        }
    }
}

/// Tab on the appointments page. Past shows completed visits only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppointmentTab {
    #[default]
    All,
    Upcoming,
    Past,
}

impl AppointmentTab {
    pub const ALL: [AppointmentTab; 3] = [AppointmentTab::All, AppointmentTab::Upcoming, AppointmentTab::Past];

    pub fn label(self) -> &'static str {
        match self {
            AppointmentTab::All => "All",
            AppointmentTab::Upcoming => "Upcoming",
            AppointmentTab::Past => "Past",
        }
    }

    fn matches(self, status: AppointmentStatus) -> bool {
        match self {
            AppointmentTab::All => true,
            AppointmentTab::Upcoming => status == AppointmentStatus::Upcoming,
            AppointmentTab::Past => status == AppointmentStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: u32,
    pub doctor: String,
    pub specialty: String,
    pub date: NaiveDate,
    pub time: String,
    pub reason: String,
    pub status: AppointmentStatus,
    /// Set for appointments booked through the portal.
    pub reference: Option<AppointmentId>,
}

impl Appointment {
    fn matches_query(&self, needle: &str) -> bool {
        [&self.doctor, &self.specialty, &self.reason]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Appointments known to the portal this session.
#[derive(Debug, Clone, Default)]
pub struct AppointmentBook {
    appointments: Vec<Appointment>,
}

impl AppointmentBook {
    /// The patient's appointment history.
    pub fn sample() -> Self {
        let rows = [
            (1, "Dr. Sarah Kapitawo", "General Practitioner", (2025, 5, 10), "10:00 AM", "Annual checkup", AppointmentStatus::Upcoming),
            (2, "Dr. Michael Kabondo", "Dermatologist", (2025, 4, 28), "2:30 PM", "Skin rash examination", AppointmentStatus::Completed),
            (3, "Dr. Emily Silwamba", "Orthopedic Surgeon", (2025, 5, 15), "11:30 AM", "Knee pain consultation", AppointmentStatus::Upcoming),
            (4, "Dr. Robert Kamanga", "Cardiologist", (2025, 3, 20), "9:00 AM", "Heart palpitations", AppointmentStatus::Completed),
            (5, "Dr. Lisa Banda", "Gynecologist", (2025, 6, 5), "3:45 PM", "Annual women's health exam", AppointmentStatus::Upcoming),
        ];

        let appointments = rows
            .into_iter()
            .filter_map(|(id, doctor, specialty, (y, m, d), time, reason, status)| {
                Some(Appointment {
                    id,
                    doctor: doctor.to_string(),
                    specialty: specialty.to_string(),
                    date: NaiveDate::from_ymd_opt(y, m, d)?,
                    time: time.to_string(),
                    reason: reason.to_string(),
                    status,
                    reference: None,
                })
            })
            .collect();

        Self { appointments }
    }

    pub fn all(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn get(&self, id: u32) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    /// Appointments matching the search text, status filter, and tab.
    pub fn filtered(&self, query: &str, status: StatusFilter, tab: AppointmentTab) -> Vec<&Appointment> {
        let needle = query.trim().to_lowercase();
        self.appointments
            .iter()
            .filter(|a| a.matches_query(&needle))
            .filter(|a| status.matches(a.status))
            .filter(|a| tab.matches(a.status))
            .collect()
    }

    /// Upcoming appointments, earliest first.
    pub fn upcoming(&self) -> Vec<&Appointment> {
        let mut upcoming: Vec<_> = self
            .appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Upcoming)
            .collect();
        upcoming.sort_by_key(|a| a.date);
        upcoming
    }

    /// Cancel an upcoming appointment.
    pub fn cancel(&mut self, id: u32, sink: &mut impl NotificationSink) -> Result<()> {
        let appointment = self.upcoming_mut(id)?;
        appointment.status = AppointmentStatus::Cancelled;
        info!("Appointment #{id} cancelled");
        sink.notify(Notification::destructive(
            "Appointment cancelled",
            format!("Appointment #{id} has been cancelled."),
        ));
        Ok(())
    }

    /// Ask staff to reschedule an upcoming appointment.
    pub fn request_reschedule(&mut self, id: u32, sink: &mut impl NotificationSink) -> Result<()> {
        self.upcoming_mut(id)?;
        info!("Reschedule requested for appointment #{id}");
        sink.notify(Notification::info(
            "Reschedule requested",
            format!("You've requested to reschedule appointment #{id}. Our staff will contact you shortly."),
        ));
        Ok(())
    }

    /// Record a booking made through the wizard. Returns the new row id.
    pub fn add_confirmed(&mut self, confirmed: &ConfirmedAppointment) -> u32 {
        let id = self.appointments.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        self.appointments.push(Appointment {
            id,
            doctor: confirmed.doctor.clone(),
            specialty: confirmed.specialty.label().to_string(),
            date: confirmed.date,
            time: confirmed.time.label().to_string(),
            reason: confirmed.symptoms.clone(),
            status: AppointmentStatus::Upcoming,
            reference: Some(confirmed.id),
        });
        info!("Added appointment #{id} ({})", confirmed.id);
        id
    }

    fn upcoming_mut(&mut self, id: u32) -> Result<&mut Appointment> {
        let appointment = self
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::not_found(format!("Appointment #{id}")))?;

        if appointment.status != AppointmentStatus::Upcoming {
            return Err(AppError::validation(format!(
                "Appointment #{id} is {}",
                appointment.status.label().to_lowercase()
            )));
        }
        Ok(appointment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{Fee, PaymentMethod, Specialty, TimeSlot};
    use crate::notify::Severity;

    fn ids(list: Vec<&Appointment>) -> Vec<u32> {
        list.into_iter().map(|a| a.id).collect()
    }

    #[test]
    fn test_sample_has_five_appointments() {
        let book = AppointmentBook::sample();
        assert_eq!(book.all().len(), 5);
        assert_eq!(book.get(3).unwrap().doctor, "Dr. Emily Silwamba");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let book = AppointmentBook::sample();
        assert_eq!(ids(book.filtered("KNEE", StatusFilter::All, AppointmentTab::All)), vec![3]);
        assert_eq!(ids(book.filtered("annual", StatusFilter::All, AppointmentTab::All)), vec![1, 5]);
        assert_eq!(ids(book.filtered("cardio", StatusFilter::All, AppointmentTab::All)), vec![4]);
    }

    #[test]
    fn test_filters_combine() {
        let book = AppointmentBook::sample();
        assert_eq!(ids(book.filtered("", StatusFilter::Upcoming, AppointmentTab::All)), vec![1, 3, 5]);
        assert_eq!(ids(book.filtered("", StatusFilter::All, AppointmentTab::Past)), vec![2, 4]);
        assert!(book.filtered("", StatusFilter::Upcoming, AppointmentTab::Past).is_empty());
        assert_eq!(ids(book.filtered("dr. r", StatusFilter::Completed, AppointmentTab::Past)), vec![4]);
    }

    #[test]
    fn test_cancel_changes_status() {
        let mut book = AppointmentBook::sample();
        let mut sink = Vec::new();
        book.cancel(1, &mut sink).unwrap();

        assert_eq!(book.get(1).unwrap().status, AppointmentStatus::Cancelled);
        assert_eq!(ids(book.filtered("", StatusFilter::Cancelled, AppointmentTab::All)), vec![1]);
        assert_eq!(sink[0].title, "Appointment cancelled");
        assert_eq!(sink[0].severity, Severity::Destructive);
    }

    #[test]
    fn test_only_upcoming_can_change() {
        let mut book = AppointmentBook::sample();
        let mut sink = Vec::new();
        assert!(matches!(book.cancel(2, &mut sink), Err(AppError::Validation(_))));
        assert!(matches!(book.request_reschedule(99, &mut sink), Err(AppError::NotFound(_))));
        assert!(sink.is_empty());

        book.request_reschedule(5, &mut sink).unwrap();
        assert_eq!(sink[0].title, "Reschedule requested");
        assert_eq!(book.get(5).unwrap().status, AppointmentStatus::Upcoming);
    }

    #[test]
    fn test_confirmed_booking_is_added_as_upcoming() {
        let mut book = AppointmentBook::sample();
        let confirmed = ConfirmedAppointment {
            id: AppointmentId::new(42).unwrap(),
            doctor: "Dr. Sarah Johnson".to_string(),
            specialty: Specialty::General,
            date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            time: TimeSlot::from_label("9:30 AM").unwrap(),
            location: "Ward 1".to_string(),
            symptoms: "persistent cough".to_string(),
            fee: Fee::new(10_000, "MK"),
            payment_method: PaymentMethod::MobileMoney,
        };

        let id = book.add_confirmed(&confirmed);
        assert_eq!(id, 6);

        let added = book.get(6).unwrap();
        assert_eq!(added.status, AppointmentStatus::Upcoming);
        assert_eq!(added.reference.unwrap().to_string(), "APT-0042");
        assert_eq!(added.specialty, "General Practitioner");

        // Earliest upcoming comes first
        assert_eq!(book.upcoming()[0].id, 6);
    }
}
