//! # Booking view state
//!
//! The booking form is an immutable [`BookingState`] value. UI events become
//! [`Command`]s and [`BookingState::update`] returns the next state, so every
//! transition can be exercised without a renderer. Derived data (bookable
//! barbers, open slots, the request to submit) is computed on demand from the
//! current state.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::{
    availability::{self, SlotLabel, WorkShift},
    errors::{BookingError, BookingResult},
    models::{
        appointment::{Appointment, NewAppointment},
        availability::BarberAvailability,
        catalog::{Barber, ServiceType},
    },
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientDetails {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub comments: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SelectDate(NaiveDate),
    AvailabilityLoaded(Vec<BarberAvailability>),
    AppointmentsLoaded(Vec<Appointment>),
    BarbersLoaded(Vec<Barber>),
    SelectBarber(i64),
    SelectService(ServiceType),
    SelectSlot(SlotLabel),
    SetClient(ClientDetails),
    AddConfirmationEmail(String),
    StartReschedule(Appointment),
    CancelReschedule,
    Reset,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingState {
    date: Option<NaiveDate>,
    availability: Vec<BarberAvailability>,
    appointments: Vec<Appointment>,
    barbers: Vec<Barber>,
    barber_id: Option<i64>,
    service: Option<ServiceType>,
    slot: Option<SlotLabel>,
    client: ClientDetails,
    extra_emails: Vec<String>,
    rescheduling: Option<Appointment>,
}

impl BookingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(self, command: Command) -> Self {
        match command {
            Command::SelectDate(date) if self.date == Some(date) => self,
            Command::SelectDate(date) => Self {
                date: Some(date),
                availability: Vec::new(),
                appointments: Vec::new(),
                barber_id: None,
                slot: None,
                ..self
            },
            Command::AvailabilityLoaded(availability) => {
                let mut next = Self {
                    availability,
                    ..self
                };
                if let Some(barber_id) = next.barber_id {
                    if next.bookable(barber_id).is_none() {
                        debug!(barber_id, "Selected barber no longer available, clearing selection");
                        next.barber_id = None;
                    }
                }
                next.with_valid_slot()
            }
            Command::AppointmentsLoaded(appointments) => Self {
                appointments,
                ..self
            }
            .with_valid_slot(),
            Command::BarbersLoaded(barbers) => Self { barbers, ..self },
            Command::SelectBarber(barber_id) => {
                if self.bookable(barber_id).is_none() {
                    warn!(barber_id, "Ignoring selection of a barber without open slots");
                    return self;
                }
                Self {
                    barber_id: Some(barber_id),
                    slot: None,
                    ..self
                }
            }
            Command::SelectService(service) => Self {
                service: Some(service),
                ..self
            }
            .with_valid_slot(),
            Command::SelectSlot(slot) => {
                if !self.available_slots().contains(&slot) {
                    warn!(slot = %slot, "Ignoring selection of an unavailable slot");
                    return self;
                }
                Self {
                    slot: Some(slot),
                    ..self
                }
            }
            Command::SetClient(client) => Self { client, ..self },
            Command::AddConfirmationEmail(email) => {
                let mut extra_emails = self.extra_emails;
                push_unique(&mut extra_emails, &email);
                Self {
                    extra_emails,
                    ..self
                }
            }
            Command::StartReschedule(appointment) => Self {
                date: Some(appointment.date),
                barber_id: Some(appointment.barber_id),
                slot: None,
                rescheduling: Some(appointment),
                ..self
            },
            Command::CancelReschedule => Self {
                rescheduling: None,
                slot: None,
                ..self
            },
            Command::Reset => Self {
                date: self.date,
                availability: self.availability,
                appointments: self.appointments,
                barbers: self.barbers,
                ..Self::default()
            },
        }
    }

    /// Drops the selected slot if the current inputs no longer offer it.
    fn with_valid_slot(mut self) -> Self {
        if let Some(slot) = self.slot {
            if !self.available_slots().contains(&slot) {
                debug!(slot = %slot, "Selected slot no longer available");
                self.slot = None;
            }
        }
        self
    }

    fn bookable(&self, barber_id: i64) -> Option<&BarberAvailability> {
        self.availability
            .iter()
            .find(|a| a.barber_id == barber_id && a.is_bookable())
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn barber_id(&self) -> Option<i64> {
        self.barber_id
    }

    pub fn service(&self) -> Option<&ServiceType> {
        self.service.as_ref()
    }

    pub fn slot(&self) -> Option<SlotLabel> {
        self.slot
    }

    pub fn client(&self) -> &ClientDetails {
        &self.client
    }

    pub fn rescheduling(&self) -> Option<&Appointment> {
        self.rescheduling.as_ref()
    }

    /// Barbers the backend lists with at least one open start time.
    pub fn bookable_barbers(&self) -> Vec<&BarberAvailability> {
        self.availability.iter().filter(|a| a.is_bookable()).collect()
    }

    fn selected_shift(&self) -> Option<(&BarberAvailability, WorkShift)> {
        let barber_id = self.barber_id?;
        let availability = self.availability.iter().find(|a| a.barber_id == barber_id)?;
        match availability.shift() {
            Ok(shift) => Some((availability, shift)),
            Err(e) => {
                warn!(barber_id, "Unusable shift: {}", e);
                None
            }
        }
    }

    fn appointments_on_date(&self) -> Vec<Appointment> {
        self.appointments
            .iter()
            .filter(|a| Some(a.date) == self.date)
            .cloned()
            .collect()
    }

    /// Open start times for the selected barber. While rescheduling, the
    /// appointment's own time is free and its whole length must fit.
    pub fn available_slots(&self) -> Vec<SlotLabel> {
        let Some((availability, shift)) = self.selected_shift() else {
            return Vec::new();
        };
        let appointments = self.appointments_on_date();

        match &self.rescheduling {
            Some(appointment) => availability::reschedule_slots(
                &shift,
                &appointments,
                &availability.available_slots,
                appointment.duration_minutes,
                appointment.id,
            ),
            None => availability::compute_available_slots(
                Some(&shift),
                &appointments,
                Some(&availability.available_slots),
                self.service.as_ref().map(|s| s.duration_minutes),
                None,
            ),
        }
    }

    /// Addresses that receive the confirmation: the barber's first, then
    /// the ones entered on the form, then the client's. Blank and repeated
    /// addresses are dropped.
    pub fn confirmation_emails(&self) -> Vec<String> {
        let mut emails = Vec::new();
        let barber_email = self
            .barber_id
            .and_then(|id| self.barbers.iter().find(|b| b.id == id))
            .and_then(|b| b.email.as_deref());
        if let Some(email) = barber_email {
            push_unique(&mut emails, email);
        }
        for email in &self.extra_emails {
            push_unique(&mut emails, email);
        }
        push_unique(&mut emails, &self.client.email);
        emails
    }

    /// The request to create the selected appointment.
    ///
    /// # Errors
    ///
    /// `BookingError::Validation` for an incomplete form, and the errors of
    /// [`availability::validate_booking`] when the service no longer fits.
    pub fn submission(&self) -> BookingResult<NewAppointment> {
        let missing = |what: &str| BookingError::Validation(format!("Select a {what}"));

        let date = self.date.ok_or_else(|| missing("date"))?;
        let barber_id = self.barber_id.ok_or_else(|| missing("barber"))?;
        let service = self.service.as_ref().ok_or_else(|| missing("service"))?;
        let slot = self.slot.ok_or_else(|| missing("time"))?;

        if self.client.name.trim().is_empty() {
            return Err(BookingError::Validation(
                "Client name is required".to_string(),
            ));
        }

        let confirmation_emails = self.confirmation_emails();
        if confirmation_emails.is_empty() {
            return Err(BookingError::Validation(
                "At least one confirmation email is required".to_string(),
            ));
        }

        let (_, shift) = self
            .selected_shift()
            .ok_or_else(|| BookingError::NotFound(format!("No shift for barber {barber_id}")))?;
        availability::validate_booking(
            &shift,
            &self.appointments_on_date(),
            slot.minute_of_day(),
            service.duration_minutes,
            None,
        )?;

        Ok(NewAppointment {
            date,
            start_time: slot.to_24h(),
            barber_id,
            service_id: service.id,
            client_name: self.client.name.trim().to_string(),
            client_email: self.client.email.trim().to_string(),
            client_phone: self.client.phone.clone(),
            comments: self.client.comments.clone(),
            confirmation_emails,
        })
    }

    /// The appointment id and new `"HH:MM"` for a pending reschedule.
    pub fn reschedule_target(&self) -> BookingResult<(i64, String)> {
        let appointment = self.rescheduling.as_ref().ok_or_else(|| {
            BookingError::Validation("No appointment is being rescheduled".to_string())
        })?;
        let slot = self
            .slot
            .ok_or_else(|| BookingError::Validation("Select a time".to_string()))?;

        let new_time = slot.to_24h();
        let current = crate::time::parse_24h(&appointment.start_time).ok();
        if current == Some(slot.minute_of_day()) {
            return Err(BookingError::Validation(
                "The new time must differ from the current one".to_string(),
            ));
        }

        Ok((appointment.id, new_time))
    }
}

fn push_unique(emails: &mut Vec<String>, email: &str) {
    let email = email.trim();
    if !email.is_empty() && !emails.iter().any(|e| e == email) {
        emails.push(email.to_string());
    }
}
